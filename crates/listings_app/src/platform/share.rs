//! Share action: native share sheet when the platform has one, clipboard otherwise.

use copypasta::{ClipboardContext, ClipboardProvider};
use feed_logging::{feed_info, feed_warn};
use listings_core::{ShareOutcome, SharePayload};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share sheet failed: {0}")]
    Native(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// A native share sheet.
pub trait ShareTarget {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError>;
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError>;
}

pub struct SystemClipboard {
    context: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ShareError> {
        let context = ClipboardContext::new().map_err(|e| ShareError::Clipboard(e.to_string()))?;
        Ok(Self { context })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
        self.context
            .set_contents(text.to_string())
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}

#[derive(Default)]
pub struct ShareService {
    native: Option<Box<dyn ShareTarget>>,
    clipboard: Option<Box<dyn Clipboard>>,
}

impl ShareService {
    pub fn new(
        native: Option<Box<dyn ShareTarget>>,
        clipboard: Option<Box<dyn Clipboard>>,
    ) -> Self {
        Self { native, clipboard }
    }

    /// Terminals have no share sheet; the system clipboard is used when it can be opened.
    pub fn detect() -> Self {
        let clipboard = match SystemClipboard::new() {
            Ok(clipboard) => Some(Box::new(clipboard) as Box<dyn Clipboard>),
            Err(err) => {
                feed_warn!("{}", err);
                None
            }
        };
        Self::new(None, clipboard)
    }

    pub fn share(&mut self, payload: &SharePayload) -> ShareOutcome {
        if let Some(native) = self.native.as_mut() {
            match native.share(payload) {
                Ok(()) => {
                    feed_info!("Shared listing {} via share sheet", payload.listing_id);
                    return ShareOutcome::Shared;
                }
                Err(err) => feed_warn!("{}; falling back to clipboard", err),
            }
        }

        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(&payload.url) {
                Ok(()) => return ShareOutcome::CopiedToClipboard,
                Err(err) => feed_warn!("{}", err),
            }
        }

        ShareOutcome::Unavailable {
            url: payload.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn payload() -> SharePayload {
        SharePayload {
            listing_id: "listing-1-0".to_string(),
            title: "Art Supplies".to_string(),
            text: "Check out this listing: Art Supplies - $150".to_string(),
            url: "https://listings.example/listing/listing-1-0".to_string(),
        }
    }

    struct RecordingClipboard {
        contents: Rc<RefCell<Option<String>>>,
    }

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ShareError> {
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ShareError> {
            Err(ShareError::Clipboard("no display".to_string()))
        }
    }

    struct Sheet {
        works: bool,
        shared: Rc<RefCell<Vec<String>>>,
    }

    impl ShareTarget for Sheet {
        fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
            if self.works {
                self.shared.borrow_mut().push(payload.text.clone());
                Ok(())
            } else {
                Err(ShareError::Native("dismissed".to_string()))
            }
        }
    }

    #[test]
    fn native_share_wins_when_present() {
        let shared = Rc::new(RefCell::new(Vec::new()));
        let contents = Rc::new(RefCell::new(None));
        let mut service = ShareService::new(
            Some(Box::new(Sheet {
                works: true,
                shared: shared.clone(),
            })),
            Some(Box::new(RecordingClipboard {
                contents: contents.clone(),
            })),
        );

        assert_eq!(service.share(&payload()), ShareOutcome::Shared);
        assert_eq!(shared.borrow().len(), 1);
        assert!(contents.borrow().is_none());
    }

    #[test]
    fn clipboard_receives_url_without_share_sheet() {
        let contents = Rc::new(RefCell::new(None));
        let mut service = ShareService::new(
            None,
            Some(Box::new(RecordingClipboard {
                contents: contents.clone(),
            })),
        );

        assert_eq!(service.share(&payload()), ShareOutcome::CopiedToClipboard);
        assert_eq!(
            contents.borrow().as_deref(),
            Some("https://listings.example/listing/listing-1-0")
        );
    }

    #[test]
    fn failing_share_sheet_falls_back_to_clipboard() {
        let contents = Rc::new(RefCell::new(None));
        let mut service = ShareService::new(
            Some(Box::new(Sheet {
                works: false,
                shared: Rc::new(RefCell::new(Vec::new())),
            })),
            Some(Box::new(RecordingClipboard {
                contents: contents.clone(),
            })),
        );

        assert_eq!(service.share(&payload()), ShareOutcome::CopiedToClipboard);
        assert!(contents.borrow().is_some());
    }

    #[test]
    fn no_capabilities_returns_link() {
        let mut service = ShareService::new(None, Some(Box::new(BrokenClipboard)));
        assert_eq!(
            service.share(&payload()),
            ShareOutcome::Unavailable {
                url: "https://listings.example/listing/listing-1-0".to_string()
            }
        );
        let mut empty = ShareService::default();
        assert!(matches!(
            empty.share(&payload()),
            ShareOutcome::Unavailable { .. }
        ));
    }
}
