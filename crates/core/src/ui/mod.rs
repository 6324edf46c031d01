pub mod notification;
pub mod output;
pub mod read_only;
pub mod status_bar;

pub use notification::{NotificationLocation, NotificationManager, STATUS_BAR_MESSAGE_TIMEOUT};
pub use output::OutputManager;
pub use read_only::{DocumentNode, READ_ONLY_SCHEME, ReadOnlyDocumentManager};
pub use status_bar::{StatusBarManager, StatusBarManagerItem, StatusBarSlot};
