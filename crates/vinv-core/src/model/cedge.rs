// ── cEdge model classification ──

use std::collections::HashSet;

/// Catalog device classes whose models are cEdge (IOS-XE SD-WAN) platforms.
pub const CEDGE_DEVICE_CLASSES: [&str; 3] = ["cisco-router", "eio-lte", "vbranch"];

/// Controller device class shared by vEdge and cEdge routers.
pub const VEDGE_CLASS: &str = "vedge";

/// Derived type for `vedge`-class devices running a cEdge model.
pub const CEDGE_TYPE: &str = "cedge";

/// Model names that identify a `vedge`-class device as a cEdge.
///
/// Built once per run from the device model catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CedgeModelSet {
    models: HashSet<String>,
}

impl CedgeModelSet {
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a catalog entry of this class contributes to the set.
    pub fn is_cedge_class(device_class: &str) -> bool {
        CEDGE_DEVICE_CLASSES.contains(&device_class)
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.contains(model)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Derive the reported device type.
    ///
    /// `vedge` splits into `cedge` / `vedge` by model; every other class
    /// is reported unchanged.
    pub fn device_type(&self, device_class: &str, model: &str) -> String {
        if device_class == VEDGE_CLASS {
            if self.contains(model) {
                CEDGE_TYPE.into()
            } else {
                VEDGE_CLASS.into()
            }
        } else {
            device_class.into()
        }
    }
}
