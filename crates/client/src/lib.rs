pub mod api;
pub mod cart;
pub mod form;
pub mod notify;
pub mod store;

pub use api::{ClientError, HttpStorefrontApi, StorefrontApi};
pub use cart::{Cart, CartChange, CartLine};
pub use form::{FormField, OrderForm};
pub use notify::{Notification, NotificationId, NotificationKind, NotificationQueue};
pub use store::{BlockReason, LoadOutcome, OrderOutcome, StoreState, SubmissionState};
