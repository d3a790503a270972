use tracing::warn;

/// Host-document seam for promoting named anchors into mount points.
///
/// The real host wraps a DOM; tests use an in-memory set of names.
pub trait AnchorHost {
    fn has_anchor(&self, name: &str) -> bool;
    /// Attaches the mount's class to the anchor so the host can style and
    /// observe it.
    fn promote(&mut self, name: &str, class_name: &str);
}

/// One promoted anchor, addressable by its class for later mounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub name: String,
    pub class_name: String,
}

/// Promotes each named anchor the host actually contains.
///
/// A missing anchor is skipped with a warning; the remaining mounts are
/// still built, so one absent section never takes down the whole story.
pub fn build_mount_points<H: AnchorHost>(host: &mut H, names: &[&str]) -> Vec<MountPoint> {
    let mut mounts = Vec::with_capacity(names.len());
    for name in names {
        if !host.has_anchor(name) {
            warn!(name, "anchor not found in host document, skipping mount");
            continue;
        }
        let class_name = format!("mount-{name}");
        host.promote(name, &class_name);
        mounts.push(MountPoint {
            name: (*name).to_owned(),
            class_name,
        });
    }
    mounts
}
