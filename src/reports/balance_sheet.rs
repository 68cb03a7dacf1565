use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{
    money::{within_tolerance, DEFAULT_TOLERANCE},
    Account, AccountId, AccountType, NormalBalance,
};

pub const SNAPSHOT_SOURCE: &str = "snapshot";
pub const CURRENT_EARNINGS_CODE: &str = "NET_INCOME";
pub const CURRENT_EARNINGS_NAME: &str = "Current Period Net Income";

/// Filters applied while building a balance sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceSheetOptions {
    #[serde(default)]
    pub include_zero_balances: bool,
    #[serde(default)]
    pub include_inactive_accounts: bool,
    #[serde(default = "BalanceSheetOptions::default_tolerance")]
    pub tolerance: Decimal,
    /// Folds unclosed revenue less expense into equity as one synthetic line.
    #[serde(default = "BalanceSheetOptions::default_include_current_earnings")]
    pub include_current_earnings: bool,
}

impl BalanceSheetOptions {
    fn default_tolerance() -> Decimal {
        DEFAULT_TOLERANCE
    }

    fn default_include_current_earnings() -> bool {
        true
    }
}

impl Default for BalanceSheetOptions {
    fn default() -> Self {
        Self {
            include_zero_balances: false,
            include_inactive_accounts: false,
            tolerance: DEFAULT_TOLERANCE,
            include_current_earnings: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Assets,
    Liabilities,
    Equity,
}

impl SectionKind {
    pub fn for_account_type(account_type: AccountType) -> Option<Self> {
        match account_type {
            AccountType::Asset => Some(SectionKind::Assets),
            AccountType::Liability => Some(SectionKind::Liabilities),
            AccountType::Equity => Some(SectionKind::Equity),
            AccountType::Revenue | AccountType::Expense => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Assets => "Assets",
            SectionKind::Liabilities => "Liabilities",
            SectionKind::Equity => "Equity",
        }
    }
}

/// Current versus non-current split, derived from the account code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Current,
    NonCurrent,
}

impl Classification {
    /// Asset codes `11xx` and liability codes `21xx` are current; everything
    /// else, including all equity, is non-current.
    pub fn from_code(account_type: AccountType, code: &str) -> Self {
        let current = match account_type {
            AccountType::Asset => code.starts_with("11"),
            AccountType::Liability => code.starts_with("21"),
            _ => false,
        };
        if current {
            Classification::Current
        } else {
            Classification::NonCurrent
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountBalanceItem {
    pub account_id: AccountId,
    pub account_code: String,
    pub account_name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub debit_balance: Decimal,
    pub credit_balance: Decimal,
    pub is_active: bool,
    pub classification: Classification,
}

impl AccountBalanceItem {
    /// Places the balance on the account's normal side, or on the opposite
    /// side when it is negative (contra balance).
    pub fn from_account(account: &Account) -> Self {
        let magnitude = account.balance.abs();
        let on_normal_side = account.balance >= Decimal::ZERO;
        let debit_side = match account.account_type.normal_balance() {
            NormalBalance::Debit => on_normal_side,
            NormalBalance::Credit => !on_normal_side,
        };
        let (debit_balance, credit_balance) = if debit_side {
            (magnitude, Decimal::ZERO)
        } else {
            (Decimal::ZERO, magnitude)
        };
        Self {
            account_id: account.id,
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            account_type: account.account_type,
            balance: account.balance,
            debit_balance,
            credit_balance,
            is_active: account.is_active,
            classification: Classification::from_code(account.account_type, &account.code),
        }
    }

    /// Equity line carrying revenue less expense that has not been closed yet.
    /// A loss sits on the debit side.
    pub fn current_earnings(net_income: Decimal) -> Self {
        let (debit_balance, credit_balance) = if net_income >= Decimal::ZERO {
            (Decimal::ZERO, net_income)
        } else {
            (net_income.abs(), Decimal::ZERO)
        };
        Self {
            account_id: AccountId(0),
            account_code: CURRENT_EARNINGS_CODE.to_string(),
            account_name: CURRENT_EARNINGS_NAME.to_string(),
            account_type: AccountType::Equity,
            balance: net_income,
            debit_balance,
            credit_balance,
            is_active: true,
            classification: Classification::NonCurrent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub items: Vec<AccountBalanceItem>,
    pub total: Decimal,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Recomputed sum of item balances, independent of the stored `total`.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|item| item.balance).sum()
    }

    pub fn current_total(&self) -> Decimal {
        self.total_for(Classification::Current)
    }

    pub fn non_current_total(&self) -> Decimal {
        self.total_for(Classification::NonCurrent)
    }

    fn total_for(&self, classification: Classification) -> Decimal {
        self.items
            .iter()
            .filter(|item| item.classification == classification)
            .map(|item| item.balance)
            .sum()
    }

    fn finish(mut self) -> Self {
        self.items.sort_by(|a, b| a.account_code.cmp(&b.account_code));
        self.total = self.items_total();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceSheetMetadata {
    pub accounts_included: usize,
    pub source: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceSheet {
    pub as_of_date: NaiveDate,
    pub assets: Section,
    pub liabilities: Section,
    pub equity: Section,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub total_liabilities_equity: Decimal,
    pub is_balanced: bool,
    pub balance_difference: Decimal,
    pub tolerance: Decimal,
    pub metadata: BalanceSheetMetadata,
}

impl BalanceSheet {
    pub fn sections(&self) -> [&Section; 3] {
        [&self.assets, &self.liabilities, &self.equity]
    }

    pub fn section(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::Assets => &self.assets,
            SectionKind::Liabilities => &self.liabilities,
            SectionKind::Equity => &self.equity,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &AccountBalanceItem> {
        self.sections()
            .into_iter()
            .flat_map(|section| section.items.iter())
    }

    pub fn item(&self, account_code: &str) -> Option<&AccountBalanceItem> {
        self.items().find(|item| item.account_code == account_code)
    }
}

/// Aggregates account snapshots into a balance sheet as of `as_of_date`.
///
/// Revenue, expense and header accounts never appear as items. Unless
/// `include_current_earnings` is off, their net lands in equity as a single
/// [`CURRENT_EARNINGS_CODE`] line. `generated_at` is the only value not
/// derived from the inputs.
pub fn compute_balance_sheet(
    accounts: &[Account],
    as_of_date: NaiveDate,
    options: &BalanceSheetOptions,
) -> BalanceSheet {
    let mut assets = Section::new(SectionKind::Assets);
    let mut liabilities = Section::new(SectionKind::Liabilities);
    let mut equity = Section::new(SectionKind::Equity);
    let mut net_income = Decimal::ZERO;

    for account in accounts {
        if account.is_header {
            continue;
        }
        if !account.is_active && !options.include_inactive_accounts {
            continue;
        }
        let Some(kind) = SectionKind::for_account_type(account.account_type) else {
            match account.account_type {
                AccountType::Revenue => net_income += account.balance,
                AccountType::Expense => net_income -= account.balance,
                _ => {}
            }
            continue;
        };
        if account.balance.is_zero() && !options.include_zero_balances {
            continue;
        }
        let item = AccountBalanceItem::from_account(account);
        match kind {
            SectionKind::Assets => assets.items.push(item),
            SectionKind::Liabilities => liabilities.items.push(item),
            SectionKind::Equity => equity.items.push(item),
        }
    }

    let accounts_included = assets.items.len() + liabilities.items.len() + equity.items.len();
    if options.include_current_earnings && !net_income.is_zero() {
        equity.items.push(AccountBalanceItem::current_earnings(net_income));
    }

    let assets = assets.finish();
    let liabilities = liabilities.finish();
    let equity = equity.finish();

    let total_assets = assets.total;
    let total_liabilities = liabilities.total;
    let total_equity = equity.total;
    let total_liabilities_equity = total_liabilities + total_equity;
    let balance_difference = total_assets - total_liabilities_equity;
    let is_balanced = within_tolerance(total_assets, total_liabilities_equity, options.tolerance);

    tracing::debug!(
        %as_of_date,
        %total_assets,
        %total_liabilities,
        %total_equity,
        %balance_difference,
        %net_income,
        accounts_included,
        "balance sheet computed"
    );

    BalanceSheet {
        as_of_date,
        assets,
        liabilities,
        equity,
        total_assets,
        total_liabilities,
        total_equity,
        total_liabilities_equity,
        is_balanced,
        balance_difference,
        tolerance: options.tolerance,
        metadata: BalanceSheetMetadata {
            accounts_included,
            source: SNAPSHOT_SOURCE.to_string(),
            generated_at: Utc::now(),
        },
    }
}
