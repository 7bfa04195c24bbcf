//! HTTP-backed reputation services with canned responses.

mod helpers;

use denylist::{DenylistError, GoogleSafeBrowsing, HostList, HpHosts, UrlTester};

use helpers::{urls, CannedHttp};

#[test]
fn test_safe_browsing_reports_listed_urls_in_order() {
    let http = CannedHttp::new(200, "ok\nphishing,malware\nok\n");
    let gsb = GoogleSafeBrowsing::new("denylist", "1.0", "secret", &http);
    let input = urls(&["http://a.com", "http://b.com/x", "http://c.com"]);

    assert_eq!(gsb.filter_matching(&input).unwrap(), urls(&["http://b.com/x"]));

    let requests = http.requests.borrow();
    let (url, body) = &requests[0];
    assert!(url.contains("key=secret"));
    assert!(url.contains("pver=3.1"));
    assert_eq!(
        body.as_deref(),
        Some("3\nhttp://a.com\nhttp://b.com/x\nhttp://c.com")
    );
}

#[test]
fn test_safe_browsing_no_content_means_clean() {
    let http = CannedHttp::new(204, "");
    let gsb = GoogleSafeBrowsing::new("denylist", "1.0", "secret", &http);
    assert!(!gsb.any_match(&urls(&["http://a.com"])).unwrap());
}

#[test]
fn test_safe_browsing_rejected_key() {
    let http = CannedHttp::new(401, "");
    let gsb = GoogleSafeBrowsing::new("denylist", "1.0", "wrong", &http);
    assert!(matches!(
        gsb.any_match(&urls(&["http://a.com"])),
        Err(DenylistError::UnauthorizedApiKey { .. })
    ));
}

#[test]
fn test_hp_hosts_lookup_reads_classes() {
    let http = CannedHttp::new(200, "Listed,EMD,PSH");
    let hp_hosts = HpHosts::new("tester", &http).with_base_url("http://hphosts.test/");

    let item = hp_hosts.lookup("bad.example").unwrap().unwrap();
    assert_eq!(item.source, "hphosts");
    assert!(item.classification.contains("EMD"));
    assert!(item.classification.contains("PSH"));
    assert!(http.requests.borrow()[0].0.contains("class=true"));
}

#[test]
fn test_hp_hosts_skips_ipv6() {
    let http = CannedHttp::new(200, "Listed");
    let hp_hosts = HpHosts::new("tester", &http);
    assert!(!hp_hosts.contains("2001:db8::1").unwrap());
    assert!(http.requests.borrow().is_empty());
}
