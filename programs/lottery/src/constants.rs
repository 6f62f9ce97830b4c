pub const MAX_BETTORS: usize = 200;

pub const SEED_CFG: &[u8] = b"cfg";
pub const SEED_ROUND: &[u8] = b"round";
pub const SEED_PRIZE: &[u8] = b"prize";
pub const SEED_VAULT: &[u8] = b"vault";
pub const SEED_MINT: &[u8] = b"mint";

pub const TOKEN_NAME: &str = "Lottery Token";
pub const TOKEN_DECIMALS: u8 = 9;
/// One whole token in base units.
pub const ONE_TOKEN: u64 = 1_000_000_000;

/// Lamports paid per token base unit minted; also the refund rate on return.
pub const TOKEN_RATIO: u64 = 1_000;
/// Price of a single bet (1 token), goes to the prize pool.
pub const BET_PRICE: u64 = ONE_TOKEN;
/// Fee of a single bet (0.2 token), goes to the owner pool.
pub const BET_FEE: u64 = ONE_TOKEN / 5;

/// Domain separator mixed into the winner-draw seed.
pub const DRAW_DOMAIN: &[u8] = b"lottery-draw-v1";
