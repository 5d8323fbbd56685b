use runtime::Frame;
use tracing::debug;

use crate::scene::{GlobeScene, GlobeSnapshot};

/// Graphics backend for the globe.
///
/// `release` frees whatever `draw` allocated (canvas, GPU buffers, DOM
/// nodes). [`GlobeView`] calls it exactly once per renderer.
pub trait GlobeRenderer {
    fn draw(&mut self, snapshot: &GlobeSnapshot);
    fn release(&mut self);
}

enum Mount<R> {
    Unmounted,
    Mounted { renderer: R, scene: GlobeScene },
}

/// Mount/tick/unmount lifecycle around a [`GlobeScene`] and its renderer.
pub struct GlobeView<R: GlobeRenderer> {
    mount: Mount<R>,
}

impl<R: GlobeRenderer> Default for GlobeView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: GlobeRenderer> GlobeView<R> {
    pub fn new() -> Self {
        Self {
            mount: Mount::Unmounted,
        }
    }

    /// Attaches `renderer` and draws the initial frame. Any previous
    /// renderer is released first.
    pub fn mount(&mut self, mut renderer: R, scene: GlobeScene) {
        self.unmount();
        debug!(markers = scene.markers().len(), "globe mounted");
        renderer.draw(&scene.snapshot());
        self.mount = Mount::Mounted { renderer, scene };
    }

    /// Advances by the frame's elapsed time and redraws. No-op (returns
    /// false) while unmounted.
    pub fn tick(&mut self, frame: Frame) -> bool {
        match &mut self.mount {
            Mount::Unmounted => false,
            Mount::Mounted { renderer, scene } => {
                scene.advance(frame.dt_s);
                renderer.draw(&scene.snapshot());
                true
            }
        }
    }

    /// Releases the renderer. Returns false when nothing was mounted.
    pub fn unmount(&mut self) -> bool {
        match std::mem::replace(&mut self.mount, Mount::Unmounted) {
            Mount::Unmounted => false,
            Mount::Mounted { mut renderer, .. } => {
                renderer.release();
                debug!("globe unmounted");
                true
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.mount, Mount::Mounted { .. })
    }

    pub fn scene(&self) -> Option<&GlobeScene> {
        match &self.mount {
            Mount::Mounted { scene, .. } => Some(scene),
            Mount::Unmounted => None,
        }
    }
}

impl<R: GlobeRenderer> Drop for GlobeView<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Counts {
        draws: usize,
        releases: usize,
        last_angle: f64,
    }

    struct Recording(Rc<RefCell<Counts>>);

    impl GlobeRenderer for Recording {
        fn draw(&mut self, snapshot: &GlobeSnapshot) {
            let mut c = self.0.borrow_mut();
            c.draws += 1;
            c.last_angle = snapshot.earth_angle;
        }

        fn release(&mut self) {
            self.0.borrow_mut().releases += 1;
        }
    }

    fn recording() -> (Recording, Rc<RefCell<Counts>>) {
        let counts = Rc::new(RefCell::new(Counts::default()));
        (Recording(counts.clone()), counts)
    }

    #[test]
    fn mount_draws_the_first_frame() {
        let (r, counts) = recording();
        let mut view = GlobeView::new();
        view.mount(r, GlobeScene::default());
        assert!(view.is_mounted());
        assert_eq!(counts.borrow().draws, 1);
        assert_eq!(counts.borrow().last_angle, 0.0);
    }

    #[test]
    fn tick_spins_and_redraws() {
        let (r, counts) = recording();
        let mut view = GlobeView::new();
        view.mount(r, GlobeScene::default());

        let mut frame = Frame::first();
        for _ in 0..10 {
            frame = frame.next(0.05);
            assert!(view.tick(frame));
        }
        assert_eq!(counts.borrow().draws, 11);
        assert!((counts.borrow().last_angle - 0.06).abs() < 1e-9);
    }

    #[test]
    fn tick_while_unmounted_does_nothing() {
        let mut view: GlobeView<Recording> = GlobeView::new();
        assert!(!view.tick(Frame::fixed(1, 0.016)));
        assert!(view.scene().is_none());
    }

    #[test]
    fn unmount_releases_exactly_once() {
        let (r, counts) = recording();
        let mut view = GlobeView::new();
        view.mount(r, GlobeScene::default());

        assert!(view.unmount());
        assert!(!view.unmount());
        drop(view);
        assert_eq!(counts.borrow().releases, 1);
    }

    #[test]
    fn drop_releases_a_mounted_renderer() {
        let (r, counts) = recording();
        {
            let mut view = GlobeView::new();
            view.mount(r, GlobeScene::default());
        }
        assert_eq!(counts.borrow().releases, 1);
    }

    #[test]
    fn remount_releases_the_previous_renderer() {
        let (first, first_counts) = recording();
        let (second, second_counts) = recording();
        let mut view = GlobeView::new();
        view.mount(first, GlobeScene::default());
        view.mount(second, GlobeScene::default());

        assert_eq!(first_counts.borrow().releases, 1);
        assert_eq!(second_counts.borrow().releases, 0);
        assert_eq!(second_counts.borrow().draws, 1);
    }
}
