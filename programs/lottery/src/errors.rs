use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Amount is zero or converts to zero tokens")]
    InvalidAmount,
    #[msg("Token balance is too low")]
    InsufficientBalance,
    #[msg("Lottery allowance is too low")]
    InsufficientAllowance,
    #[msg("Lottery is not open for bets")]
    LotteryNotOpen,
    #[msg("Bets are already open")]
    AlreadyOpen,
    #[msg("Closing time must be in the future")]
    InvalidClosingTime,
    #[msg("Closing time has not been reached")]
    TooEarly,
    #[msg("Lottery is already closed")]
    NotOpen,
    #[msg("Only the owner can do this")]
    NotOwner,
    #[msg("Claimable prize is too low")]
    InsufficientPrizeBalance,
    #[msg("Owner pool is too low")]
    InsufficientOwnerBalance,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Too many bettors in this round")]
    MaxBettorsReached,
    #[msg("Previous prize has not been credited to its winner")]
    PrizePending,
    #[msg("Slot hashes sysvar is empty or malformed")]
    SlotHashUnavailable,
    #[msg("Invalid config parameters")]
    InvalidConfig,
    #[msg("Invalid owner address")]
    InvalidOwner,
    #[msg("Invalid escrow account")]
    InvalidEscrow,
    #[msg("Invalid token account")]
    InvalidTokenAccount,
    #[msg("Vault cannot cover the refund")]
    InsufficientVaultFunds,
}
