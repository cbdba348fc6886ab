//! Category Index
//!
//! Read-only projection of a signal list, one group per category, for report
//! and narrative consumers.

use serde::Serialize;

use crate::models::{AssetClass, Category, Signal};

/// Signals of one category, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: Category,
    pub score: u32,
    pub signals: Vec<Signal>,
}

/// Every category of the class, empty ones included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIndex {
    pub asset_class: AssetClass,
    pub groups: Vec<CategoryGroup>,
}

impl CategoryIndex {
    pub fn get(&self, category: Category) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// Number of signals across all groups
    pub fn signal_count(&self) -> usize {
        self.groups.iter().map(|g| g.signals.len()).sum()
    }
}

/// Group signals by category.
///
/// Groups follow the class' category order. A signal from outside the class'
/// set still gets its own trailing group so nothing is dropped.
pub fn group_by_category(signals: &[Signal], class: AssetClass) -> CategoryIndex {
    let mut groups: Vec<CategoryGroup> = Category::for_class(class)
        .iter()
        .map(|category| CategoryGroup {
            category: *category,
            score: 0,
            signals: Vec::new(),
        })
        .collect();

    for signal in signals {
        let idx = match groups.iter().position(|g| g.category == signal.category) {
            Some(idx) => idx,
            None => {
                groups.push(CategoryGroup {
                    category: signal.category,
                    score: 0,
                    signals: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[idx].score += signal.weight;
        groups[idx].signals.push(signal.clone());
    }

    CategoryIndex {
        asset_class: class,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{behavioral, equity, token};

    #[test]
    fn test_equity_groups() {
        let signals = vec![
            equity::OTC_EXCHANGE.emit(),
            equity::SPIKE_THEN_DROP.emit(),
            behavioral::SECRECY_CLAIMS.emit(),
            equity::MICROCAP_PRICE.emit(),
        ];
        let index = group_by_category(&signals, AssetClass::Equity);

        let order: Vec<Category> = index.groups.iter().map(|g| g.category).collect();
        assert_eq!(
            order,
            vec![Category::Structural, Category::Pattern, Category::Alert, Category::Behavioral]
        );
        let structural = index.get(Category::Structural).unwrap();
        assert_eq!(structural.signals.len(), 2);
        assert_eq!(structural.score, 5);
        assert!(index.get(Category::Alert).unwrap().signals.is_empty());
        assert_eq!(index.signal_count(), signals.len());
    }

    #[test]
    fn test_foreign_category_is_kept() {
        let signals = vec![token::HONEYPOT.emit()];
        let index = group_by_category(&signals, AssetClass::Equity);
        assert_eq!(index.groups.len(), 5);
        assert_eq!(index.signal_count(), 1);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let signals = vec![token::MINTABLE.emit(), token::FEW_HOLDERS.emit()];
        assert_eq!(
            group_by_category(&signals, AssetClass::Token),
            group_by_category(&signals, AssetClass::Token)
        );
    }
}
