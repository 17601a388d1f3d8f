//! Reveal-on-scroll.
//!
//! A wrapped element starts hidden (faded and offset downwards) and switches
//! to revealed the first time enough of it enters the viewport. The viewport
//! observation is held as a [`Subscription`] that is released on the first
//! qualifying intersection or when the component is torn down, whichever
//! happens first. A revealed element never goes back to hidden.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealOptions {
    /// Visible fraction of the element required to reveal it.
    pub threshold: f64,
    /// Fraction of the viewport height cut off at the bottom edge.
    pub bottom_margin: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 0.1,
        }
    }
}

impl RevealOptions {
    /// The margin in CSS `rootMargin` notation.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}% 0px", (self.bottom_margin * 100.0).round())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    fn intersection(&self, other: &Rect) -> Option<Rect> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom().min(other.bottom());
        let right = self.right().min(other.right());
        (bottom >= top && right >= left).then(|| Rect::new(top, left, right - left, bottom - top))
    }
}

/// Visible fraction of `target` inside `viewport` after applying the bottom margin.
pub fn visible_ratio(target: &Rect, viewport: &Rect, options: &RevealOptions) -> f64 {
    let root = Rect {
        height: viewport.height * (1.0 - options.bottom_margin),
        ..*viewport
    };

    match target.intersection(&root) {
        None => 0.0,
        Some(_) if target.area() == 0.0 => 1.0,
        Some(visible) => (visible.area() / target.area()).clamp(0.0, 1.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealState {
    Hidden,
    Revealed,
}

impl RevealState {
    pub fn css_class(&self) -> &'static str {
        match self {
            RevealState::Hidden => "opacity-0 translate-y-8",
            RevealState::Revealed => "opacity-100 translate-y-0",
        }
    }
}

/// Active viewport observation. Dropping it stops the observation.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

pub trait ViewportObserver {
    fn observe(&self, options: &RevealOptions) -> Subscription;
}

pub struct Reveal {
    state: RevealState,
    options: RevealOptions,
    subscription: Option<Subscription>,
}

impl Reveal {
    pub fn mount(observer: &dyn ViewportObserver, options: RevealOptions) -> Self {
        let subscription = observer.observe(&options);
        Self {
            state: RevealState::Hidden,
            options,
            subscription: Some(subscription),
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// Feeds one observation. Reveals (and stops observing) on the first
    /// entry that meets the threshold.
    pub fn on_intersection(&mut self, target: &Rect, viewport: &Rect) -> RevealState {
        if self.state == RevealState::Revealed {
            return self.state;
        }

        let ratio = visible_ratio(target, viewport, &self.options);
        if ratio > 0.0 && ratio >= self.options.threshold {
            self.state = RevealState::Revealed;
            self.subscription = None;
        }

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingObserver {
        observed: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    impl ViewportObserver for CountingObserver {
        fn observe(&self, _options: &RevealOptions) -> Subscription {
            self.observed.fetch_add(1, Ordering::SeqCst);
            let released = self.released.clone();
            Subscription::new(move || {
                released.fetch_add(1, Ordering::SeqCst);
            })
        }
    }

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 1000.0)
    }

    #[test]
    fn test_root_margin_notation() {
        assert_eq!(RevealOptions::default().root_margin(), "0px 0px -10% 0px");
    }

    #[test]
    fn test_bottom_margin_shrinks_viewport() {
        let opts = RevealOptions::default();
        // Sits entirely inside the bottom 10% band.
        let target = Rect::new(920.0, 0.0, 100.0, 60.0);
        assert_eq!(visible_ratio(&target, &viewport(), &opts), 0.0);

        // Half of it above the 900px cut-off.
        let target = Rect::new(850.0, 0.0, 100.0, 100.0);
        assert!((visible_ratio(&target, &viewport(), &opts) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stays_hidden_below_threshold() {
        let observer = CountingObserver::default();
        let mut reveal = Reveal::mount(&observer, RevealOptions::default());
        assert_eq!(reveal.state(), RevealState::Hidden);

        // 5% visible above the margin line.
        let target = Rect::new(895.0, 0.0, 100.0, 100.0);
        assert_eq!(reveal.on_intersection(&target, &viewport()), RevealState::Hidden);
        assert!(reveal.is_observing());
        assert_eq!(observer.released.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reveals_once_and_releases() {
        let observer = CountingObserver::default();
        let mut reveal = Reveal::mount(&observer, RevealOptions::default());
        assert_eq!(observer.observed.load(Ordering::SeqCst), 1);

        let target = Rect::new(500.0, 0.0, 100.0, 100.0);
        assert_eq!(reveal.on_intersection(&target, &viewport()), RevealState::Revealed);
        assert!(!reveal.is_observing());
        assert_eq!(observer.released.load(Ordering::SeqCst), 1);

        // Scrolled away again.
        let gone = Rect::new(-500.0, 0.0, 100.0, 100.0);
        assert_eq!(reveal.on_intersection(&gone, &viewport()), RevealState::Revealed);

        drop(reveal);
        assert_eq!(observer.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_teardown_releases_pending_subscription() {
        let observer = CountingObserver::default();
        let reveal = Reveal::mount(&observer, RevealOptions::default());
        drop(reveal);
        assert_eq!(observer.released.load(Ordering::SeqCst), 1);
    }
}
