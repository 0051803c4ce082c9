//! Built-in strategy catalog
//!
//! A small reference set that exercises every engine path: plain
//! deterministic rules, stochastic rules drawing from the match stream,
//! introspecting rules and a class-shared genome.

mod average_copier;
mod basic;
mod darwin;
mod geller;
mod mind_reader;
mod resurrection;

pub use average_copier::{AverageCopier, NiceAverageCopier};
pub use basic::{Alternator, Cooperator, Cycler, Defector, RandomPlayer, TitForTat};
pub use darwin::Darwin;
pub use geller::{Geller, GellerCooperator, GellerDefector};
pub use mind_reader::MindReader;
pub use resurrection::Resurrection;

use crate::classifier::Classifier;
use crate::registry::Factory;
use crate::strategy::Strategy;

/// A strategy kind known to the registry at startup.
pub trait StrategyKind: Strategy + Sized + 'static {
    const NAME: &'static str;
    const CLASSIFIER: Classifier;

    fn create() -> Self;
}

fn entry<S: StrategyKind>() -> (&'static str, Classifier, Factory) {
    (S::NAME, S::CLASSIFIER, || -> Box<dyn Strategy> { Box::new(S::create()) })
}

pub(crate) fn catalog() -> Vec<(&'static str, Classifier, Factory)> {
    vec![
        entry::<Cooperator>(),
        entry::<Defector>(),
        entry::<Alternator>(),
        entry::<Cycler>(),
        entry::<TitForTat>(),
        entry::<RandomPlayer>(),
        entry::<AverageCopier>(),
        entry::<NiceAverageCopier>(),
        entry::<Resurrection>(),
        entry::<Darwin>(),
        entry::<Geller>(),
        entry::<GellerCooperator>(),
        entry::<GellerDefector>(),
        entry::<MindReader>(),
    ]
}


#[cfg(test)]
mod tests {
    use super::catalog;
    use super::testing::respond;
    use crate::action::Action;
    use crate::classifier::MemoryDepth;
    use crate::registry;
    use proptest::prelude::*;

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![Just(Action::Cooperate), Just(Action::Defect)]
    }

    fn finite_depth_kinds() -> Vec<(&'static str, usize)> {
        catalog()
            .into_iter()
            .filter(|(_, classifier, _)| !classifier.inspects_source)
            .filter_map(|(kind, classifier, _)| match classifier.memory_depth {
                MemoryDepth::Finite(depth) => Some((kind, depth as usize)),
                MemoryDepth::Unbounded => None,
            })
            .collect()
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<_> = catalog().into_iter().map(|(kind, _, _)| kind).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_factories_build_their_kind() {
        for (kind, _, factory) in catalog() {
            assert_eq!(factory().kind(), kind);
        }
    }

    proptest! {
        // Rounds older than the declared memory depth must not matter
        #[test]
        fn prop_memory_depth_is_honest(
            window in proptest::collection::vec((action(), action()), 5..8),
            prefix_a in proptest::collection::vec((action(), action()), 0..6),
            prefix_b in proptest::collection::vec((action(), action()), 0..6),
            seed in any::<u64>(),
        ) {
            for (kind, depth) in finite_depth_kinds() {
                let recent = &window[window.len() - depth.min(window.len())..];
                let build = |prefix: &[(Action, Action)]| {
                    let pairs: Vec<_> = prefix.iter().chain(recent).copied().collect();
                    let own: Vec<_> = pairs.iter().map(|p| p.0).collect();
                    let opp: Vec<_> = pairs.iter().map(|p| p.1).collect();
                    (own, opp)
                };
                let (own_a, opp_a) = build(&prefix_a);
                let (own_b, opp_b) = build(&prefix_b);
                if own_a.is_empty() != own_b.is_empty() {
                    continue;
                }
                let mut strategy = registry::create(kind).unwrap();
                let a = respond(strategy.as_mut(), &own_a, &opp_a, seed);
                let mut strategy = registry::create(kind).unwrap();
                let b = respond(strategy.as_mut(), &own_b, &opp_b, seed);
                prop_assert_eq!(a, b, "{} depends on rounds beyond depth {}", kind, depth);
            }
        }
    }
}
