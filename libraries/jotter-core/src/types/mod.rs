mod ids;
mod note;
mod session;
mod user;

pub use ids::{NoteId, UserId};
pub use note::{Note, NoteDraft};
pub use session::{GuardState, Session};
pub use user::User;
