use std::sync::Arc;

use crate::context::SearchContext;
use crate::provider::Navigator;

type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// Minimal seam for the shell's toolbar control.
///
/// The toolbar stores at most one click handler; the shell (or a test)
/// dispatches clicks to it. Clicking an unwired toolbar is a defined no-op.
#[derive(Default)]
pub struct SearchToolbar {
    on_click: Option<ClickHandler>,
}

impl SearchToolbar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the click handler, replacing any previous one.
    pub fn set_click_handler<F>(&mut self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(handler));
    }

    /// `true` once a click handler has been installed.
    #[must_use]
    pub fn has_click_handler(&self) -> bool {
        self.on_click.is_some()
    }

    /// Dispatch one click to the installed handler, if any.
    pub fn click(&self) {
        if let Some(handler) = &self.on_click {
            handler();
        }
    }
}

/// The hosting UI container: a search context paired with the shell's
/// navigation seam.
pub struct Activity {
    context: SearchContext,
    navigator: Arc<dyn Navigator>,
}

impl Activity {
    #[must_use]
    pub fn new(context: SearchContext, navigator: Arc<dyn Navigator>) -> Self {
        Self { context, navigator }
    }

    #[must_use]
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    #[must_use]
    pub fn navigator(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn clicks_reach_the_installed_handler() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);

        let mut toolbar = SearchToolbar::new();
        assert!(!toolbar.has_click_handler());
        toolbar.click();

        toolbar.set_click_handler(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(toolbar.has_click_handler());

        toolbar.click();
        toolbar.click();
        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn replacing_the_handler_drops_the_old_one() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let mut toolbar = SearchToolbar::new();
        let counter = Arc::clone(&first);
        toolbar.set_click_handler(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        toolbar.set_click_handler(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        toolbar.click();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
