use alloy::{primitives::Address, sol_types::SolCall};
use shortcut_bindings::IERC20;
use shortcut_types::WeirollScript;

/// Find the dust tokens of a script: the token contracts it calls `approve`
/// on, minus its declared output tokens.
///
/// The result is de-duplicated and in first-seen order.
pub fn find_dust(script: &WeirollScript, tokens_out: &[Address]) -> Vec<Address> {
    let mut dust: Vec<Address> = Vec::new();
    for command in script.calls().filter(|c| c.calls(IERC20::approveCall::SELECTOR)) {
        let token = command.target();
        if !tokens_out.contains(&token) && !dust.contains(&token) {
            dust.push(token);
        }
    }
    dust
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy::primitives::B256;

    const DEPOSIT: [u8; 4] = [0x6e, 0x55, 0x3f, 0x65];

    fn command(selector: [u8; 4], flags: u8, target: Address) -> B256 {
        let mut word = [0xffu8; 32];
        word[..4].copy_from_slice(&selector);
        word[4] = flags;
        word[12..].copy_from_slice(target.as_slice());
        B256::from(word)
    }

    fn approve(token: Address) -> B256 {
        command(IERC20::approveCall::SELECTOR, 0x01, token)
    }

    #[test]
    fn approvals_become_dust() {
        let wrapped = Address::repeat_byte(0x66);
        let vault = Address::repeat_byte(0x77);
        let script = WeirollScript::new(
            vec![approve(wrapped), command(DEPOSIT, 0x01, vault), approve(wrapped)],
            vec![],
        );
        assert_eq!(find_dust(&script, &[vault]), vec![wrapped]);
    }

    #[test]
    fn outputs_are_excluded() {
        let vault = Address::repeat_byte(0x77);
        let script = WeirollScript::new(vec![approve(vault)], vec![]);
        assert!(find_dust(&script, &[vault]).is_empty());
    }

    #[test]
    fn extended_index_words_are_not_calls() {
        let wrapped = Address::repeat_byte(0x66);
        let bogus = Address::repeat_byte(0x99);
        let script = WeirollScript::new(
            vec![command(DEPOSIT, 0x41, wrapped), approve(bogus), approve(wrapped)],
            vec![],
        );
        assert_eq!(find_dust(&script, &[]), vec![wrapped]);
    }
}
