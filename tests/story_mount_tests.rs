use std::collections::BTreeMap;

use storychart::story::mounts::{AnchorHost, build_mount_points};

/// In-memory stand-in for the host document.
#[derive(Debug, Default)]
struct FakeHost {
    anchors: Vec<String>,
    promoted: BTreeMap<String, String>,
}

impl FakeHost {
    fn with_anchors(names: &[&str]) -> Self {
        Self {
            anchors: names.iter().map(|name| (*name).to_owned()).collect(),
            promoted: BTreeMap::new(),
        }
    }
}

impl AnchorHost for FakeHost {
    fn has_anchor(&self, name: &str) -> bool {
        self.anchors.iter().any(|anchor| anchor == name)
    }

    fn promote(&mut self, name: &str, class_name: &str) {
        self.promoted.insert(name.to_owned(), class_name.to_owned());
    }
}

#[test]
fn present_anchors_become_mount_points() {
    let mut host = FakeHost::with_anchors(&["chart", "search", "testimonial"]);
    let mounts = build_mount_points(&mut host, &["chart", "search"]);

    assert_eq!(mounts.len(), 2);
    assert_eq!(mounts[0].name, "chart");
    assert_eq!(mounts[0].class_name, "mount-chart");
    assert_eq!(host.promoted.get("chart"), Some(&"mount-chart".to_owned()));
    assert!(!host.promoted.contains_key("testimonial"));
}

#[test]
fn missing_anchors_are_skipped_not_fatal() {
    let mut host = FakeHost::with_anchors(&["chart"]);
    let mounts = build_mount_points(&mut host, &["chart", "absent-section", "search"]);

    assert_eq!(mounts.len(), 1);
    assert_eq!(mounts[0].name, "chart");
}

#[test]
fn no_anchors_yields_no_mounts() {
    let mut host = FakeHost::default();
    assert!(build_mount_points(&mut host, &["chart"]).is_empty());
}
