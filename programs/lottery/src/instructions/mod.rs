pub mod approve;
pub mod bet_many;
pub mod close_lottery;
pub mod init_config;
pub mod open_bets;
pub mod owner_withdraw;
pub mod prize_withdraw;
pub mod purchase_tokens;
pub mod return_tokens;
pub mod transfer_owner;
pub mod views;

pub use approve::*;
pub use bet_many::*;
pub use close_lottery::*;
pub use init_config::*;
pub use open_bets::*;
pub use owner_withdraw::*;
pub use prize_withdraw::*;
pub use purchase_tokens::*;
pub use return_tokens::*;
pub use transfer_owner::*;
pub use views::*;
