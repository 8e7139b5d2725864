//! Page transitions between navigation stack entries.

use log::debug;

use crate::driver::{AnimationHandle, AnimationHost, Completion, Transition};
use crate::ids::ElementId;
use crate::presets::{AnimationPreset, AnimationSet, TransitionDirection};

/// Capability surface of a navigable page.
pub trait PageElement {
    fn element(&self) -> ElementId;

    /// Custom enter animation; `None` uses [`AnimationSet::page_in`].
    fn animate_in(&self, _direction: TransitionDirection) -> Option<AnimationPreset> {
        None
    }

    /// Custom exit animation; `None` uses [`AnimationSet::page_out`].
    fn animate_out(&self, _direction: TransitionDirection) -> Option<AnimationPreset> {
        None
    }

    /// How long the exit runs before the next page may enter, ms.
    fn animation_out_duration(&self) -> Option<f64> {
        None
    }
}

/// Navigation stack driven by host code.
pub trait NavigationFrame {
    type Page: PageElement;
    type Completion: Completion;

    fn navigate(&mut self, page: Self::Page) -> Self::Completion;
    fn go_back(&mut self) -> Self::Completion;
}

/// Exit of the outgoing page paired with the enter of the incoming one.
#[derive(Debug)]
pub struct PageTransition<H: AnimationHandle> {
    pub outgoing: Option<Transition<H>>,
    pub incoming: Option<Transition<H>>,
}

impl<H: AnimationHandle> PageTransition<H> {
    /// A transition with nothing to play.
    pub fn none() -> Self {
        Self {
            outgoing: None,
            incoming: None,
        }
    }

    pub fn cancel(&mut self) {
        for t in self.outgoing.iter_mut().chain(self.incoming.iter_mut()) {
            t.cancel();
        }
    }

    pub fn finish(&mut self) {
        for t in self.outgoing.iter_mut().chain(self.incoming.iter_mut()) {
            t.finish();
        }
    }
}

impl<H: AnimationHandle> Completion for PageTransition<H> {
    fn is_settled(&self) -> bool {
        self.outgoing.iter().all(Completion::is_settled)
            && self.incoming.iter().all(Completion::is_settled)
    }
}

/// Plays the outgoing page's exit, then the incoming page's enter delayed by
/// the exit duration.
pub struct PageTransitioner;

impl PageTransitioner {
    pub fn run<H, P>(
        host: &mut H,
        outgoing: Option<&P>,
        incoming: Option<&P>,
        direction: TransitionDirection,
    ) -> PageTransition<H::Handle>
    where
        H: AnimationHost + ?Sized,
        P: PageElement + ?Sized,
    {
        let mut delay = 0.0;
        let outgoing = outgoing.map(|page| {
            let preset = page
                .animate_out(direction)
                .unwrap_or_else(|| AnimationSet::page_out(direction));
            delay = page
                .animation_out_duration()
                .unwrap_or_else(|| preset.duration_ms())
                .max(0.0);
            preset.play(&mut *host, page.element())
        });
        let incoming = incoming.map(|page| {
            let preset = page
                .animate_in(direction)
                .unwrap_or_else(|| AnimationSet::page_in(direction))
                .with_delay(delay);
            preset.play(&mut *host, page.element())
        });
        debug!("page transition {direction:?}, enter delayed {delay}ms");
        PageTransition { outgoing, incoming }
    }
}

/// A plain navigation stack that animates every push and pop.
pub struct PageStack<H: AnimationHost, P: PageElement> {
    host: H,
    pages: Vec<P>,
    current: Option<PageTransition<H::Handle>>,
}

impl<H: AnimationHost, P: PageElement> PageStack<H, P> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            pages: Vec::new(),
            current: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_page(&self) -> Option<&P> {
        self.pages.last()
    }

    pub fn depth(&self) -> usize {
        self.pages.len()
    }

    /// Stop whatever transition is still running; elements stay where they are.
    pub fn cancel_transition(&mut self) {
        if let Some(mut t) = self.current.take() {
            t.cancel();
        }
    }
}

impl<H, P> NavigationFrame for PageStack<H, P>
where
    H: AnimationHost,
    H::Handle: Clone,
    P: PageElement,
{
    type Page = P;
    type Completion = PageTransition<H::Handle>;

    fn navigate(&mut self, page: P) -> Self::Completion {
        self.cancel_transition();
        let t = PageTransitioner::run(
            &mut self.host,
            self.pages.last(),
            Some(&page),
            TransitionDirection::Forward,
        );
        self.pages.push(page);
        self.current = Some(t.share());
        t
    }

    fn go_back(&mut self) -> Self::Completion {
        if self.pages.len() < 2 {
            return PageTransition::none();
        }
        self.cancel_transition();
        let leaving = self.pages.pop();
        let t = PageTransitioner::run(
            &mut self.host,
            leaving.as_ref(),
            self.pages.last(),
            TransitionDirection::Back,
        );
        self.current = Some(t.share());
        t
    }
}

impl<H: AnimationHandle + Clone> PageTransition<H> {
    fn share(&self) -> Self {
        let copy = |t: &Transition<H>| Transition::new(t.handle().clone());
        Self {
            outgoing: self.outgoing.as_ref().map(copy),
            incoming: self.incoming.as_ref().map(copy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::AnimationTiming;
    use crate::keyframe::Keyframe;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Handle(Rc<Cell<u8>>);

    impl AnimationHandle for Handle {
        fn is_finished(&self) -> bool {
            self.0.get() > 0
        }
        fn cancel(&mut self) {
            self.0.set(2);
        }
        fn finish(&mut self) {
            self.0.set(1);
        }
    }

    #[derive(Default)]
    struct Host {
        played: Vec<(ElementId, usize, AnimationTiming)>,
        handles: Vec<Handle>,
    }

    impl AnimationHost for Host {
        type Handle = Handle;
        fn play(&mut self, target: ElementId, frames: &[Keyframe], timing: &AnimationTiming) -> Handle {
            self.played.push((target, frames.len(), timing.clone()));
            let h = Handle(Rc::new(Cell::new(0)));
            self.handles.push(h.clone());
            h
        }
    }

    struct Page(u32, Option<f64>);

    impl PageElement for Page {
        fn element(&self) -> ElementId {
            ElementId(self.0)
        }
        fn animation_out_duration(&self) -> Option<f64> {
            self.1
        }
    }

    #[test]
    fn enter_waits_for_exit_duration() {
        let mut host = Host::default();
        let t = PageTransitioner::run(
            &mut host,
            Some(&Page(1, Some(120.0))),
            Some(&Page(2, None)),
            TransitionDirection::Forward,
        );
        assert_eq!(host.played.len(), 2);
        assert_eq!(host.played[0].0, ElementId(1));
        assert_eq!(host.played[1].2.delay_ms, 120.0);
        assert!(!t.is_settled());
        // spline presets reach the host densified
        assert!(host.played[1].1 > 3);
    }

    #[test]
    fn stack_push_pop() {
        let mut stack = PageStack::new(Host::default());
        let first = stack.navigate(Page(1, None));
        assert!(first.outgoing.is_none());
        let mut second = stack.navigate(Page(2, None));
        assert_eq!(stack.depth(), 2);
        second.finish();
        assert!(second.is_settled());

        let back = stack.go_back();
        assert_eq!(stack.current_page().unwrap().0, 1);
        assert_eq!(
            back.outgoing.as_ref().unwrap().handle().0.get(),
            0,
            "exit still running"
        );
        assert!(stack.go_back().is_settled());
    }

    #[test]
    fn new_navigation_cancels_running_transition() {
        let mut stack = PageStack::new(Host::default());
        let _ = stack.navigate(Page(1, None));
        let _ = stack.navigate(Page(2, None));
        // the first push's enter handle was canceled by the second push
        assert_eq!(stack.host().handles[0].0.get(), 2);
    }
}
