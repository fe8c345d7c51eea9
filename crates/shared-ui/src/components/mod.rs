pub mod badge;
pub mod button;
pub mod card;
pub mod choice;
pub mod data_table;
pub mod input;
pub mod notice;
pub mod page_header;
pub mod pagination;
pub mod sidebar;
pub mod skeleton;
pub mod toast;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use choice::*;
pub use data_table::*;
pub use input::*;
pub use notice::*;
pub use page_header::*;
pub use pagination::*;
pub use sidebar::*;
pub use skeleton::*;
pub use toast::*;
