//! Listing and advisory fixtures

/// Listing page of `rhev-hypervisor` with two active and two shipped advisories
pub const RHEV_HYPERVISOR_LISTING: &str = r#"<!DOCTYPE html>
<html>
<head><title>rhev-hypervisor</title></head>
<body>
  <h2>Active Errata</h2>
  <table class="bug_list">
    <thead>
      <tr><th>Advisory</th><th>Synopsis</th><th>Builds</th><th>Status</th></tr>
    </thead>
    <tbody>
      <tr>
        <td><a class="advisory_link" href="/advisory/RHBA-2016:1234">RHBA-2016:1234</a></td>
        <td>rhev-hypervisor bug fix update</td>
        <td>RHEV-3.6 rhev-hypervisor-20160613.0.el6ev</td>
        <td>QE</td>
      </tr>
      <tr>
        <td><a class="advisory_link" href="/advisory/RHBA-2016:2000">RHBA-2016:2000</a></td>
        <td>rhev-hypervisor for RHEV 4.0</td>
        <td>RHEV-4.0 rhev-hypervisor7-7.2-20160711.0.el7ev</td>
        <td>NEW_FILES</td>
      </tr>
    </tbody>
  </table>
  <h2>Shipped Errata</h2>
  <table class="bug_list">
    <thead>
      <tr><th>Advisory</th><th>Synopsis</th><th>Status</th><th>Builds</th></tr>
    </thead>
    <tbody>
      <tr>
        <td>RHSA-2016:0001</td>
        <td>rhev-hypervisor security update</td>
        <td>SHIPPED_LIVE</td>
        <td>RHEV-3.6 rhev-hypervisor-20160105.0.el6ev</td>
      </tr>
      <tr>
        <td>RHBA-2015:1500</td>
        <td>rhev-hypervisor 3.5 update</td>
        <td>SHIPPED_LIVE</td>
        <td>RHEV-3.5 rhev-hypervisor-20150828.0.el6ev</td>
      </tr>
    </tbody>
  </table>
</body>
</html>"#;

/// Advisory JSON record with a release date timestamp
pub fn advisory_json_with_date(timestamp: &str) -> String {
    format!(r#"{{"id": 24012, "timestamps": {{"release_date": "{timestamp}"}}, "release": {{"id": 512}}}}"#)
}

/// Advisory JSON record without a release date
#[allow(dead_code)]
pub fn advisory_json_without_date(release_id: u64) -> String {
    format!(r#"{{"id": 24013, "timestamps": {{"release_date": null}}, "release": {{"id": {release_id}}}}}"#)
}

/// Advisory page with the given `Release date` cell
pub fn advisory_page(release_date: &str) -> String {
    format!(
        r#"<html><body><table>
             <tr><td>Synopsis</td><td>update</td></tr>
             <tr><td>Release date</td><td>{release_date}</td></tr>
           </table></body></html>"#
    )
}
