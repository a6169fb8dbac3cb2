//! Pure data structures: money, menus, the order draft, and the backend
//! records that implement [`ActorEntity`](crate::framework::ActorEntity).

pub mod catalog;
pub mod draft;
pub mod menu;
pub mod money;
pub mod order;
pub mod slot;

pub use catalog::*;
pub use draft::*;
pub use menu::*;
pub use money::*;
pub use order::*;
pub use slot::*;
