use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use crate::constants::DRAW_DOMAIN;
use crate::errors::ErrorCode;

/// Token amounts moved by a single `bet_many` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetCost {
    pub price: u64,
    pub fee: u64,
    pub total: u64,
}

pub fn checked_add_u64(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(ErrorCode::MathOverflow.into())
}

pub fn checked_sub_u64(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(ErrorCode::MathOverflow.into())
}

pub fn checked_mul_u64(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b).ok_or(ErrorCode::MathOverflow.into())
}

/// Token base units minted for `paid_lamports`. Truncates; a purchase that
/// would mint nothing is rejected.
pub fn tokens_for_payment(paid_lamports: u64, ratio: u64) -> Result<u64> {
    require!(paid_lamports > 0, ErrorCode::InvalidAmount);
    let minted = paid_lamports
        .checked_div(ratio)
        .ok_or(ErrorCode::MathOverflow)?;
    require!(minted > 0, ErrorCode::InvalidAmount);
    Ok(minted)
}

/// Lamports paid back when `amount` token base units are returned.
pub fn refund_for_tokens(amount: u64, ratio: u64) -> Result<u64> {
    require!(amount > 0, ErrorCode::InvalidAmount);
    checked_mul_u64(amount, ratio)
}

pub fn bet_cost(times: u64, bet_price: u64, bet_fee: u64) -> Result<BetCost> {
    require!(times > 0, ErrorCode::InvalidAmount);
    let price = checked_mul_u64(times, bet_price)?;
    let fee = checked_mul_u64(times, bet_fee)?;
    let total = checked_add_u64(price, fee)?;
    Ok(BetCost { price, fee, total })
}

/// transferFrom guard: balance is checked before the allowance.
pub fn ensure_spendable(balance: u64, allowance: u64, amount: u64) -> Result<()> {
    require!(balance >= amount, ErrorCode::InsufficientBalance);
    require!(allowance >= amount, ErrorCode::InsufficientAllowance);
    Ok(())
}

/// Allowance `spender` holds over a token account. SPL keeps a single
/// delegate, so a delegation to anyone else counts as zero.
pub fn delegated_allowance(delegate: COption<Pubkey>, delegated_amount: u64, spender: &Pubkey) -> u64 {
    match delegate {
        COption::Some(d) if d == *spender => delegated_amount,
        _ => 0,
    }
}

/// The vault must stay rent exempt after paying out `refund`.
pub fn ensure_vault_covers(vault_lamports: u64, rent_floor: u64, refund: u64) -> Result<()> {
    let spendable = vault_lamports.saturating_sub(rent_floor);
    require!(spendable >= refund, ErrorCode::InsufficientVaultFunds);
    Ok(())
}

pub fn bit_add(bit: &mut [u64], mut i: usize, delta: u64) -> Result<()> {
    let n = bit.len() - 1; // 1-indexed
    while i <= n {
        bit[i] = bit[i].checked_add(delta).ok_or(ErrorCode::MathOverflow)?;
        i += i & (!i + 1); // i += lowbit(i)
    }
    Ok(())
}

/// Sum of the first `i` entries (1-based, inclusive).
pub fn bit_prefix_sum(bit: &[u64], mut i: usize) -> u64 {
    let mut sum = 0u64;
    while i > 0 {
        sum = sum.saturating_add(bit[i]);
        i -= i & (!i + 1);
    }
    sum
}

/// Smallest 1-based index whose prefix sum reaches `target`.
pub fn bit_find_prefix(bit: &[u64], target: u64) -> Result<usize> {
    let n = bit.len() - 1;
    let mut bit_mask = 1usize;
    while bit_mask <= n {
        bit_mask <<= 1;
    }
    let mut idx = 0usize;
    let mut cur = 0u64;
    let mut step = bit_mask;
    while step > 0 {
        let next = idx + step;
        if next <= n {
            let cand = cur.checked_add(bit[next]).ok_or(ErrorCode::MathOverflow)?;
            if cand < target {
                idx = next;
                cur = cand;
            }
        }
        step >>= 1;
    }
    Ok(idx + 1)
}

/// Most recent `(slot, hash)` entry of the SlotHashes sysvar.
///
/// Layout: `u64` entry count, then `(u64 slot, [u8; 32] hash)` entries,
/// newest first.
pub fn latest_slot_hash(data: &[u8]) -> Result<(u64, [u8; 32])> {
    require!(data.len() >= 48, ErrorCode::SlotHashUnavailable);

    let mut word = [0u8; 8];
    word.copy_from_slice(&data[0..8]);
    require!(u64::from_le_bytes(word) > 0, ErrorCode::SlotHashUnavailable);

    word.copy_from_slice(&data[8..16]);
    let slot = u64::from_le_bytes(word);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[16..48]);
    Ok((slot, hash))
}

/// Everything that feeds the winner draw of one round.
pub struct DrawInputs {
    pub slot_hash: [u8; 32],
    pub slot: u64,
    pub round_id: u64,
    pub closing_ts: i64,
    pub now: i64,
    pub total_tickets: u64,
}

/// `BLAKE3(DRAW_DOMAIN || slot_hash || slot || round_id || closing_ts || now || total_tickets)`,
/// integers little-endian.
///
/// Anyone holding the SlotHashes entry and the round record can recompute the
/// draw. Slot hashes are known to (and can be steered by) the leader producing
/// the block, so this is not a secure randomness source.
pub fn derive_draw_seed(inputs: &DrawInputs) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DRAW_DOMAIN);
    hasher.update(&inputs.slot_hash);
    hasher.update(&inputs.slot.to_le_bytes());
    hasher.update(&inputs.round_id.to_le_bytes());
    hasher.update(&inputs.closing_ts.to_le_bytes());
    hasher.update(&inputs.now.to_le_bytes());
    hasher.update(&inputs.total_tickets.to_le_bytes());
    *hasher.finalize().as_bytes()
}

/// 1-based winning ticket in `1..=total_tickets`.
pub fn winning_ticket(seed: &[u8; 32], total_tickets: u64) -> Result<u64> {
    require!(total_tickets > 0, ErrorCode::MathOverflow);
    let mut bytes16 = [0u8; 16];
    bytes16.copy_from_slice(&seed[..16]);
    let r = u128::from_le_bytes(bytes16);
    Ok((r % total_tickets as u128) as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BET_FEE, BET_PRICE, ONE_TOKEN, TOKEN_RATIO};

    #[test]
    fn purchase_truncates_and_rejects_dust() {
        assert_eq!(tokens_for_payment(1_000, TOKEN_RATIO).unwrap(), 1);
        assert_eq!(tokens_for_payment(2_999, TOKEN_RATIO).unwrap(), 2);

        let err = tokens_for_payment(999, TOKEN_RATIO).unwrap_err();
        assert_eq!(err, ErrorCode::InvalidAmount.into());
        let err = tokens_for_payment(0, TOKEN_RATIO).unwrap_err();
        assert_eq!(err, ErrorCode::InvalidAmount.into());
    }

    #[test]
    fn refund_never_exceeds_payment() {
        for paid in [1_000u64, 1_001, 5_999, 1_000_000] {
            let minted = tokens_for_payment(paid, TOKEN_RATIO).unwrap();
            let refund = refund_for_tokens(minted, TOKEN_RATIO).unwrap();
            assert!(refund <= paid);
            if paid % TOKEN_RATIO == 0 {
                assert_eq!(refund, paid);
            }
        }
    }

    #[test]
    fn bet_cost_splits_price_and_fee() {
        let cost = bet_cost(5, BET_PRICE, BET_FEE).unwrap();
        assert_eq!(cost.price, 5 * ONE_TOKEN);
        assert_eq!(cost.fee, ONE_TOKEN);
        assert_eq!(cost.total, 6 * ONE_TOKEN);

        assert_eq!(bet_cost(0, BET_PRICE, BET_FEE).unwrap_err(), ErrorCode::InvalidAmount.into());
        assert_eq!(
            bet_cost(u64::MAX, BET_PRICE, BET_FEE).unwrap_err(),
            ErrorCode::MathOverflow.into()
        );
    }

    #[test]
    fn spend_check_reports_balance_before_allowance() {
        let cost = BET_PRICE + BET_FEE;
        assert_eq!(
            ensure_spendable(ONE_TOKEN, ONE_TOKEN, cost).unwrap_err(),
            ErrorCode::InsufficientBalance.into()
        );
        assert_eq!(
            ensure_spendable(2 * ONE_TOKEN, ONE_TOKEN, cost).unwrap_err(),
            ErrorCode::InsufficientAllowance.into()
        );
        ensure_spendable(cost, cost, cost).unwrap();
    }

    #[test]
    fn only_delegation_to_the_lottery_counts() {
        let lottery = Pubkey::new_from_array([1u8; 32]);
        let other = Pubkey::new_from_array([2u8; 32]);

        assert_eq!(delegated_allowance(COption::Some(lottery), 50, &lottery), 50);
        assert_eq!(delegated_allowance(COption::Some(other), 50, &lottery), 0);
        assert_eq!(delegated_allowance(COption::None, 50, &lottery), 0);

        // approving someone else leaves the lottery without allowance
        let allowance = delegated_allowance(COption::Some(other), u64::MAX, &lottery);
        assert_eq!(
            ensure_spendable(10, allowance, 10).unwrap_err(),
            ErrorCode::InsufficientAllowance.into()
        );
    }

    #[test]
    fn vault_keeps_rent_floor_after_refund() {
        ensure_vault_covers(1_500, 1_000, 500).unwrap();
        assert_eq!(
            ensure_vault_covers(1_500, 1_000, 501).unwrap_err(),
            ErrorCode::InsufficientVaultFunds.into()
        );
        assert_eq!(
            ensure_vault_covers(900, 1_000, 1).unwrap_err(),
            ErrorCode::InsufficientVaultFunds.into()
        );
    }

    #[test]
    fn fenwick_prefix_and_search_agree() {
        let mut bit = vec![0u64; 9];
        let weights = [3u64, 0, 5, 1, 2];
        for (i, w) in weights.iter().enumerate() {
            if *w > 0 {
                bit_add(&mut bit, i + 1, *w).unwrap();
            }
        }
        assert_eq!(bit_prefix_sum(&bit, 5), 11);
        assert_eq!(bit_prefix_sum(&bit, 3) - bit_prefix_sum(&bit, 2), 5);

        assert_eq!(bit_find_prefix(&bit, 1).unwrap(), 1);
        assert_eq!(bit_find_prefix(&bit, 3).unwrap(), 1);
        assert_eq!(bit_find_prefix(&bit, 4).unwrap(), 3);
        assert_eq!(bit_find_prefix(&bit, 8).unwrap(), 3);
        assert_eq!(bit_find_prefix(&bit, 9).unwrap(), 4);
        assert_eq!(bit_find_prefix(&bit, 11).unwrap(), 5);
    }

    #[test]
    fn slot_hashes_yield_newest_entry() {
        let mut data = vec![0u8; 8 + 2 * 40];
        data[0..8].copy_from_slice(&2u64.to_le_bytes());
        data[8..16].copy_from_slice(&77u64.to_le_bytes());
        data[16..48].copy_from_slice(&[7u8; 32]);
        data[48..56].copy_from_slice(&76u64.to_le_bytes());
        data[56..88].copy_from_slice(&[6u8; 32]);

        let (slot, hash) = latest_slot_hash(&data).unwrap();
        assert_eq!(slot, 77);
        assert_eq!(hash, [7u8; 32]);

        let mut empty = vec![0u8; 48];
        empty[0..8].copy_from_slice(&0u64.to_le_bytes());
        assert_eq!(latest_slot_hash(&empty).unwrap_err(), ErrorCode::SlotHashUnavailable.into());
        assert_eq!(latest_slot_hash(&[0u8; 8]).unwrap_err(), ErrorCode::SlotHashUnavailable.into());
    }

    #[test]
    fn draw_seed_is_reproducible_and_input_sensitive() {
        let inputs = DrawInputs {
            slot_hash: [9u8; 32],
            slot: 1_234,
            round_id: 3,
            closing_ts: 1_700_000_100,
            now: 1_700_000_105,
            total_tickets: 12,
        };
        let seed = derive_draw_seed(&inputs);
        assert_eq!(seed, derive_draw_seed(&inputs));

        let later = DrawInputs { now: inputs.now + 1, ..inputs };
        assert_ne!(seed, derive_draw_seed(&later));

        let ticket = winning_ticket(&seed, 12).unwrap();
        assert!((1..=12).contains(&ticket));
    }

    #[test]
    fn winning_ticket_maps_low_bytes_modulo_total() {
        let mut seed = [0u8; 32];
        seed[0] = 10;
        assert_eq!(winning_ticket(&seed, 4).unwrap(), 3);
        assert_eq!(winning_ticket(&seed, 1).unwrap(), 1);
        assert!(winning_ticket(&seed, 0).is_err());
    }
}
