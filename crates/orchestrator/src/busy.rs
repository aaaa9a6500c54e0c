use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Classes of orchestrated actions. At most one request per class is in
/// flight at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SendMessage,
    CreateSite,
    GenerateContent,
    Download,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::SendMessage => "send message",
            Action::CreateSite => "create site",
            Action::GenerateContent => "generate content",
            Action::Download => "download",
        })
    }
}

/// One re-entrancy flag per action class
#[derive(Debug, Default)]
pub struct BusyFlags {
    sending_message: AtomicBool,
    creating_site: AtomicBool,
    generating_content: AtomicBool,
    downloading: AtomicBool,
}

impl BusyFlags {
    fn flag(&self, action: Action) -> &AtomicBool {
        match action {
            Action::SendMessage => &self.sending_message,
            Action::CreateSite => &self.creating_site,
            Action::GenerateContent => &self.generating_content,
            Action::Download => &self.downloading,
        }
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.flag(action).load(Ordering::Acquire)
    }

    /// Set the flag for `action` if it is clear. The flag is cleared again
    /// when the returned guard drops, on success and failure paths alike.
    pub fn try_acquire(&self, action: Action) -> Option<BusyGuard<'_>> {
        self.flag(action)
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                flag: self.flag(action),
            })
    }
}

#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
