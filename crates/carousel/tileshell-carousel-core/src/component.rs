//! Lifecycle shared by Hub, Pivot and FlipView.
//!
//! A component owns a [`Carousel`] plus a handful of named sub-elements
//! (slots). Hosts create the real nodes for each slot id and call the
//! lifecycle hooks as the component is attached, detached and reconfigured.

use tileshell_motion_core::{ElementId, IdAllocator};

use crate::carousel::Carousel;
use crate::frame::FrameScheduler;

pub const SLOT_VIEWPORT: &str = "viewport";
pub const SLOT_HEADER: &str = "header";
pub const SLOT_BACKGROUND: &str = "background";
pub const SLOT_TITLE: &str = "title";

/// Named sub-elements with ids that stay fixed for the component's lifetime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slots {
    entries: Vec<(&'static str, ElementId)>,
}

impl Slots {
    pub fn allocate(ids: &mut IdAllocator, names: &[&'static str]) -> Self {
        Self {
            entries: names.iter().map(|name| (*name, ids.alloc())).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<ElementId> {
        self.entries
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, id)| *id)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

pub trait Component {
    fn carousel(&self) -> &Carousel;
    fn carousel_mut(&mut self) -> &mut Carousel;

    /// Id of the named sub-element, if this component has one.
    fn slot(&self, name: &str) -> Option<ElementId>;

    /// Attached to a live host: frame callbacks may now be requested.
    fn mount(&mut self, scheduler: Box<dyn FrameScheduler>) {
        self.carousel_mut().attach_scheduler(scheduler);
    }

    /// Detached: in-flight motion stops where it is.
    fn unmount(&mut self) {
        let carousel = self.carousel_mut();
        carousel.cancel_motion();
        carousel.detach_scheduler();
    }

    /// Host attribute changed. Returns whether the component reacted.
    fn on_attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) -> bool {
        if old == new {
            return false;
        }
        self.carousel_mut().apply_attribute(name, new)
    }
}
