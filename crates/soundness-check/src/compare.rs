use crate::bundle::HeaderBundle;

/// Field-by-field agreement between two header bundles.
///
/// Every compared field is reported individually so a diverging field is
/// never hidden behind the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonResult {
    pub chain_id: bool,
    pub number: bool,
    pub hash: bool,
    pub parent_hash: bool,
    pub state_root: bool,
    pub receipts_root: bool,
    pub transactions_root: bool,
    pub commitment: bool,
}

impl ComparisonResult {
    /// Overall verdict: the conjunction of all per-field booleans.
    pub fn is_sound(&self) -> bool {
        self.chain_id
            && self.number
            && self.hash
            && self.parent_hash
            && self.state_root
            && self.receipts_root
            && self.transactions_root
            && self.commitment
    }
}

pub fn compare_bundles(primary: &HeaderBundle, secondary: &HeaderBundle) -> ComparisonResult {
    ComparisonResult {
        chain_id: primary.fields.chain_id == secondary.fields.chain_id,
        number: primary.fields.number == secondary.fields.number,
        hash: primary.fields.hash == secondary.fields.hash,
        parent_hash: primary.fields.parent_hash == secondary.fields.parent_hash,
        state_root: primary.fields.state_root == secondary.fields.state_root,
        receipts_root: primary.fields.receipts_root == secondary.fields.receipts_root,
        transactions_root: primary.fields.transactions_root == secondary.fields.transactions_root,
        commitment: primary.commitment == secondary.commitment,
    }
}
