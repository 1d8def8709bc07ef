use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::config::SplitRatios;
use crate::core::dataset::DatasetSplit;
use crate::core::scanner::ClassBucket;
use crate::core::taxonomy::TargetClass;

/// The three split assignments for a single class
#[derive(Debug, Clone, Default)]
pub struct ClassSplit {
    pub train: Vec<PathBuf>,
    pub val: Vec<PathBuf>,
    pub test: Vec<PathBuf>,
}

impl ClassSplit {
    pub fn get(&self, split: DatasetSplit) -> &Vec<PathBuf> {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Val => &self.val,
            DatasetSplit::Test => &self.test,
        }
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }
}

/// Per-class split assignments for the whole corpus
pub type SplitPlan = BTreeMap<TargetClass, ClassSplit>;

/// Total number of assigned files across the plan
pub fn plan_total(plan: &SplitPlan) -> usize {
    plan.values().map(|class_split| class_split.total()).sum()
}

/// Derive a per-class rng seed so that adding files to one class never
/// perturbs the shuffle order of another.
fn class_seed(seed: u64, class: TargetClass) -> u64 {
    seed ^ (class as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Partition every class of the bucket into train/val/test.
///
/// File lists are sorted before shuffling so the assignment depends only on
/// the set of paths and the seed, not on filesystem enumeration order.
/// Counts follow the floor/remainder rule: `train = floor(n * train_ratio)`,
/// then the remainder is divided between val and test by their relative
/// weight, with leftovers going to test.
pub fn split_bucket(bucket: &ClassBucket, ratios: &SplitRatios, seed: u64) -> SplitPlan {
    let mut plan = SplitPlan::new();

    for (class, paths) in bucket {
        let mut files = paths.clone();
        files.sort();

        let mut rng = StdRng::seed_from_u64(class_seed(seed, *class));
        files.shuffle(&mut rng);

        let n = files.len();
        if n == 0 {
            info!("Class {} has no images", class.as_str());
            plan.insert(*class, ClassSplit::default());
            continue;
        }

        let train_count = (n as f64 * ratios.train).floor() as usize;
        let rest = n - train_count;
        let holdout = ratios.val + ratios.test;
        let val_count = if holdout > 0.0 {
            (rest as f64 * (ratios.val / holdout)).floor() as usize
        } else {
            0
        };

        let mut remaining = files.into_iter();
        let train: Vec<PathBuf> = remaining.by_ref().take(train_count).collect();
        let val: Vec<PathBuf> = remaining.by_ref().take(val_count).collect();
        let test: Vec<PathBuf> = remaining.collect();

        info!(
            "Class {}: {} images -> train {}, val {}, test {}",
            class.as_str(),
            n,
            train.len(),
            val.len(),
            test.len()
        );

        plan.insert(*class, ClassSplit { train, val, test });
    }

    plan
}
