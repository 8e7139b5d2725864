//! Pivot: a carousel with a header strip.
//!
//! Each child's `header` attribute becomes a strip item. The strip scrolls
//! with the content (one header width per page once widths are measured) and
//! highlights the page in view. Activating a header jumps to its page and
//! plays the page-enter preset on the incoming item.

use serde::{Deserialize, Serialize};

use tileshell_motion_core::{AnimationHost, AnimationSet, ElementId, IdAllocator, TransitionDirection};

use crate::carousel::Carousel;
use crate::component::{Component, Slots, SLOT_HEADER, SLOT_VIEWPORT};
use crate::config::CarouselConfig;
use crate::element::ChildItem;
use crate::events::CarouselEvent;
use crate::layout::CSS_PRECISION;
use crate::parallax::ParallaxFrame;
use crate::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaderItem {
    pub index: usize,
    pub label: String,
    pub highlighted: bool,
}

pub struct Pivot {
    carousel: Carousel,
    slots: Slots,
    header_widths: Vec<f64>,
}

impl Pivot {
    pub fn new(config: CarouselConfig, ids: &mut IdAllocator) -> Self {
        Self {
            carousel: Carousel::new(config),
            slots: Slots::allocate(ids, &[SLOT_VIEWPORT, SLOT_HEADER]),
            header_widths: Vec::new(),
        }
    }

    /// Replace the items; header widths must be measured again.
    pub fn set_items(&mut self, items: Vec<ChildItem>) {
        self.header_widths.clear();
        self.carousel.set_children(items);
    }

    /// Rendered widths of the header strip items, in item order.
    pub fn set_header_widths(&mut self, widths: Vec<f64>) {
        self.header_widths = widths;
    }

    pub fn headers(&self) -> Vec<HeaderItem> {
        let highlighted = self.highlighted_index();
        self.carousel
            .children()
            .iter()
            .enumerate()
            .map(|(index, child)| HeaderItem {
                index,
                label: child.header().unwrap_or_default().to_string(),
                highlighted: highlighted == Some(index),
            })
            .collect()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.carousel.selected_index()
    }

    /// Strip offset for the current content offset, px.
    ///
    /// With measured widths the strip advances one header per page,
    /// interpolating inside the page being crossed. Before measurement it
    /// trails the content at the configured header ratio.
    pub fn header_translate(&self) -> f64 {
        let state = self.carousel.state();
        if !state.is_measurable() {
            return 0.0;
        }
        let n = state.child_count;
        let measured =
            self.header_widths.len() == n && self.header_widths.iter().all(|w| w.is_finite() && *w > 0.0);
        if !measured {
            return ParallaxFrame::for_state(state, &self.carousel.config().parallax).header_translate;
        }

        let last = (n - 1) as f64;
        let page = state.offset / state.extent;
        let page = if state.looped {
            page.rem_euclid(n as f64)
        } else {
            page.clamp(0.0, last)
        };
        let whole = (page.floor() as usize).min(n - 1);
        let fraction = (page - whole as f64).clamp(0.0, 1.0);
        let passed: f64 = self.header_widths[..whole].iter().sum();
        -(passed + fraction * self.header_widths[whole])
    }

    pub fn header_translate_css(&self) -> String {
        format!(
            "{}px",
            tileshell_motion_core::format_number(self.header_translate(), CSS_PRECISION)
        )
    }

    /// Activate header `index`: jump the content to its page and animate the
    /// incoming item in. Reselecting the current page only reports the
    /// invocation.
    pub fn select_header<H>(&mut self, index: usize, host: &mut H) -> Result<()>
    where
        H: AnimationHost + ?Sized,
        H::Handle: 'static,
    {
        let target = self.carousel.page_offset(index)?;
        self.carousel.push_event(CarouselEvent::HeaderInvoked { index });
        if self.carousel.selected_index() == Some(index) && !self.carousel.state().is_settling() {
            return Ok(());
        }

        let direction = if target >= self.carousel.offset() {
            TransitionDirection::Forward
        } else {
            TransitionDirection::Back
        };
        self.carousel.cancel_motion();
        self.carousel.set_scroll_offset(target);

        let child = &self.carousel.children()[index];
        let (element, data) = (child.element, child.data.clone());
        let transition = AnimationSet::page_in(direction).play(host, element);
        self.carousel
            .track_transition(Box::new(transition.into_handle()));
        self.carousel.push_event(CarouselEvent::ItemSelected {
            index,
            data,
            element,
        });
        Ok(())
    }
}

impl Component for Pivot {
    fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    fn slot(&self, name: &str) -> Option<ElementId> {
        self.slots.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tileshell_motion_core::{AnimationHandle, AnimationTiming, Keyframe};

    #[derive(Default)]
    struct Host {
        played: Vec<(ElementId, Vec<Keyframe>)>,
        finished: Rc<Cell<bool>>,
    }

    struct Handle(Rc<Cell<bool>>);

    impl AnimationHandle for Handle {
        fn is_finished(&self) -> bool {
            self.0.get()
        }
        fn cancel(&mut self) {
            self.0.set(true);
        }
        fn finish(&mut self) {
            self.0.set(true);
        }
    }

    impl AnimationHost for Host {
        type Handle = Handle;

        fn play(&mut self, target: ElementId, frames: &[Keyframe], _: &AnimationTiming) -> Handle {
            self.played.push((target, frames.to_vec()));
            Handle(self.finished.clone())
        }
    }

    fn pivot() -> Pivot {
        let mut ids = IdAllocator::starting_at(50);
        let mut pivot = Pivot::new(CarouselConfig::default(), &mut ids);
        pivot.set_items(
            ["all", "unread", "flagged"]
                .iter()
                .enumerate()
                .map(|(i, label)| ChildItem::new(ElementId(i as u32)).with_attribute("header", *label))
                .collect(),
        );
        pivot.carousel_mut().resize(400.0).unwrap();
        pivot
    }

    #[test]
    fn headers_follow_child_attributes() {
        let pivot = pivot();
        let headers = pivot.headers();
        assert_eq!(headers[1].label, "unread");
        assert!(headers[0].highlighted);
        assert!(!headers[2].highlighted);
    }

    #[test]
    fn strip_advances_one_header_per_page() {
        let mut pivot = pivot();
        pivot.set_header_widths(vec![80.0, 120.0, 100.0]);
        pivot.carousel_mut().set_scroll_offset(600.0);
        // past page 0 (80) and half of page 1 (60)
        assert_eq!(pivot.header_translate(), -140.0);
        assert_eq!(pivot.header_translate_css(), "-140px");
        assert_eq!(pivot.highlighted_index(), Some(2));
    }

    #[test]
    fn unmeasured_strip_trails_content() {
        let mut pivot = pivot();
        pivot.carousel_mut().set_scroll_offset(200.0);
        assert_eq!(pivot.header_translate(), -100.0);
    }

    #[test]
    fn selecting_a_header_jumps_and_animates() {
        let mut pivot = pivot();
        let mut host = Host::default();
        pivot.select_header(2, &mut host).unwrap();

        assert_eq!(pivot.carousel().offset(), 800.0);
        assert_eq!(host.played.len(), 1);
        assert_eq!(host.played[0].0, ElementId(2));
        assert!(pivot.carousel().is_animating());

        let events = pivot.carousel_mut().drain_events();
        assert_eq!(events[0], CarouselEvent::HeaderInvoked { index: 2 });
        assert!(matches!(events[1], CarouselEvent::ItemSelected { index: 2, .. }));

        host.finished.set(true);
        assert!(pivot.carousel_mut().poll_transitions());
    }

    #[test]
    fn reselecting_current_header_does_not_animate() {
        let mut pivot = pivot();
        let mut host = Host::default();
        pivot.select_header(0, &mut host).unwrap();
        assert!(host.played.is_empty());
        assert!(pivot.select_header(5, &mut host).is_err());
    }
}
