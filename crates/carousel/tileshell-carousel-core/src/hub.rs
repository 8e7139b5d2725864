//! Hub: a panorama of sections under an app title, with a parallax
//! background and header that trail the content. Each section also owns a
//! background layer that cross-fades as its section scrolls in and out.

use log::debug;

use tileshell_motion_core::{AnimationHost, AnimationSet, ElementId, IdAllocator, TransitionDirection};

use crate::carousel::Carousel;
use crate::component::{Component, Slots, SLOT_BACKGROUND, SLOT_HEADER, SLOT_TITLE, SLOT_VIEWPORT};
use crate::config::CarouselConfig;
use crate::element::ChildItem;
use crate::parallax::{ParallaxFrame, SectionBackground};

pub const ATTR_APP_TITLE: &str = "app-title";
/// Present on the hub element while the enter transition runs.
pub const ATTR_ANIMATING: &str = "animating";

pub struct Hub {
    carousel: Carousel,
    slots: Slots,
    title: Option<String>,
    animating: bool,
}

impl Hub {
    pub fn new(config: CarouselConfig, ids: &mut IdAllocator) -> Self {
        Self {
            carousel: Carousel::new(config),
            slots: Slots::allocate(
                ids,
                &[SLOT_VIEWPORT, SLOT_HEADER, SLOT_BACKGROUND, SLOT_TITLE],
            ),
            title: None,
            animating: false,
        }
    }

    pub fn set_sections(&mut self, sections: Vec<ChildItem>) {
        self.carousel.set_children(sections);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Background and header positions for the current offset.
    pub fn parallax(&self) -> ParallaxFrame {
        ParallaxFrame::for_state(self.carousel.state(), &self.carousel.config().parallax)
    }

    /// Per-section background layers for the current offset.
    pub fn backgrounds(&self) -> Vec<SectionBackground> {
        SectionBackground::compute(
            self.carousel.state(),
            self.carousel.children(),
            &self.carousel.config().parallax,
        )
    }

    /// Play the hub enter transition: the title fades in while the section
    /// viewport turns in.
    pub fn animate_in<H>(&mut self, host: &mut H)
    where
        H: AnimationHost + ?Sized,
        H::Handle: 'static,
    {
        self.carousel.cancel_transitions();
        if let Some(title) = self.slots.get(SLOT_TITLE) {
            let fade = AnimationSet::fade(true).play(host, title);
            self.carousel.track_transition(Box::new(fade.into_handle()));
        }
        if let Some(viewport) = self.slots.get(SLOT_VIEWPORT) {
            let enter = AnimationSet::page_in(TransitionDirection::Forward).play(host, viewport);
            self.carousel.track_transition(Box::new(enter.into_handle()));
        }
        self.animating = true;
    }

    /// Check the enter transition; clears the marker once it has settled.
    /// Returns whether the hub is still animating.
    pub fn poll(&mut self) -> bool {
        if self.animating && self.carousel.poll_transitions() {
            debug!("hub enter transition settled");
            self.animating = false;
        }
        self.animating
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Host-visible attribute value; boolean attributes read as `""`.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            ATTR_APP_TITLE => self.title.clone(),
            ATTR_ANIMATING => self.animating.then(String::new),
            _ => self.carousel.attribute(name),
        }
    }
}

impl Component for Hub {
    fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    fn slot(&self, name: &str) -> Option<ElementId> {
        self.slots.get(name)
    }

    fn unmount(&mut self) {
        self.carousel.cancel_motion();
        self.carousel.detach_scheduler();
        self.animating = false;
    }

    fn on_attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) -> bool {
        if old == new {
            return false;
        }
        if name == ATTR_APP_TITLE {
            self.title = new.map(str::to_string);
            return true;
        }
        self.carousel.apply_attribute(name, new)
    }
}
