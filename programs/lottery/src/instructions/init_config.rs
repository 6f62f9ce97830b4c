use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{
    constants::*,
    errors::ErrorCode,
    events::ConfigInitialized,
    state::{Config, Round, Vault},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct InitConfigArgs {
    /// Token base units per bet that go to the prize pool.
    pub bet_price: u64,
    /// Token base units per bet that go to the owner pool.
    pub bet_fee: u64,
    /// Lamports per token base unit on purchase and return.
    pub purchase_ratio: u64,
}

impl Default for InitConfigArgs {
    fn default() -> Self {
        Self {
            bet_price: BET_PRICE,
            bet_fee: BET_FEE,
            purchase_ratio: TOKEN_RATIO,
        }
    }
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = Config::SPACE,
        seeds = [SEED_CFG],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = payer,
        space = Vault::SPACE,
        seeds = [SEED_VAULT],
        bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(
        init,
        payer = payer,
        space = Round::SPACE,
        seeds = [SEED_ROUND],
        bump
    )]
    pub round: AccountLoader<'info, Round>,

    #[account(
        init,
        payer = payer,
        seeds = [SEED_MINT],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = config,
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    /// Escrow for every token committed by bets, owned by the config PDA.
    #[account(
        init,
        payer = payer,
        associated_token::mint = token_mint,
        associated_token::authority = config,
    )]
    pub escrow: Box<Account<'info, TokenAccount>>,

    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitConfig>, args: InitConfigArgs) -> Result<()> {
    require!(args.bet_price > 0, ErrorCode::InvalidConfig);
    require!(args.purchase_ratio > 0, ErrorCode::InvalidConfig);

    let cfg = &mut ctx.accounts.config;
    cfg.owner = ctx.accounts.owner.key();
    cfg.token_mint = ctx.accounts.token_mint.key();
    cfg.escrow = ctx.accounts.escrow.key();
    cfg.bet_price = args.bet_price;
    cfg.bet_fee = args.bet_fee;
    cfg.purchase_ratio = args.purchase_ratio;
    cfg.owner_pool = 0;
    cfg.pending_winner = cfg.owner;
    cfg.pending_prize = 0;
    cfg.bump = ctx.bumps.config;
    cfg.mint_bump = ctx.bumps.token_mint;
    cfg.vault_bump = ctx.bumps.vault;
    cfg.reserved = [0u8; 29];

    ctx.accounts.vault.bump = ctx.bumps.vault;

    // round starts Closed with round_id 0; everything else is zeroed by init
    let mut round = ctx.accounts.round.load_init()?;
    round.bump = ctx.bumps.round;
    drop(round);

    emit!(ConfigInitialized {
        owner: cfg.owner,
        token_mint: cfg.token_mint,
        escrow: cfg.escrow,
        bet_price: cfg.bet_price,
        bet_fee: cfg.bet_fee,
        purchase_ratio: cfg.purchase_ratio,
    });

    Ok(())
}
