//! Configuration handle bound to one configuration root

use camino::{Utf8Path, Utf8PathBuf};
use confd_core::error::{ConfdError, ConfdResult};
use confd_core::utils::path::build_subpath;
use confd_core::Strategy;
use std::fmt;
use std::future::Future;
use tracing::debug;

use crate::resolve::{load, Resolved};


/// Create a handle for the configuration tree rooted at `root`
pub fn from(root: impl AsRef<str>) -> ConfdResult<Conf> {
    Conf::new(root)
}

/// Front door to one configuration tree.
///
/// The handle keeps no resolved state: every [`Conf::get`] reads the tree again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conf {
    /// Root of the configuration tree
    root: Utf8PathBuf,
    /// Strategy used by the next `get`
    strategy: Strategy,
}

/// Strategy accessors of a [`Conf`]
pub struct StrategySelector<'a> {
    conf: &'a mut Conf,
}

impl Conf {
    /// Create a handle using the default strategy
    pub fn new(root: impl AsRef<str>) -> ConfdResult<Self> {
        let root = root.as_ref();
        if root.is_empty() {
            return Err(ConfdError::invalid_argument("root", "must not be empty"));
        }

        Ok(Self {
            root: Utf8PathBuf::from(root),
            strategy: Strategy::default_strategy(),
        })
    }

    /// The root this handle was created from
    pub fn from_path(&self) -> &Utf8Path {
        &self.root
    }

    /// The strategy the next `get` will use
    pub fn current_strategy(&self) -> Strategy {
        self.strategy
    }

    /// Read or change the strategy
    pub fn strategy(&mut self) -> StrategySelector<'_> {
        StrategySelector { conf: self }
    }

    /// Resolve the node named by `segments` below the root.
    ///
    /// Root and strategy are captured when this is called, so changing the
    /// strategy afterwards does not affect the returned future. Without any
    /// non-empty segment the root itself is resolved: `BACKCURSION` then
    /// behaves like `LEAVES` since there are no ancestors to accumulate.
    pub fn get(
        &self,
        segments: &[&str],
    ) -> impl Future<Output = ConfdResult<Resolved>> + Send + 'static {
        let root = self.root.clone();
        let subpath = build_subpath(segments);
        let strategy = self.strategy;

        async move {
            let subpath = subpath?;
            let strategy = match strategy {
                Strategy::Backcursion if subpath.as_str() == "." => Strategy::Leaves,
                other => other,
            };

            debug!("get {} under {} ({})", subpath, root, strategy);
            load(&root, subpath.as_str(), strategy).await
        }
    }
}

impl fmt::Display for Conf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conf({}, {})", self.root, self.strategy)
    }
}

impl<'a> StrategySelector<'a> {
    /// Switch to `LEAVES`
    pub fn leaves(self) -> &'a mut Conf {
        self.conf.strategy = Strategy::Leaves;
        self.conf
    }

    /// Switch to `BACKCURSION`
    pub fn backcursion(self) -> &'a mut Conf {
        self.conf.strategy = Strategy::Backcursion;
        self.conf
    }

    /// Switch to `ARRAY`
    pub fn array(self) -> &'a mut Conf {
        self.conf.strategy = Strategy::Array;
        self.conf
    }

    /// The current strategy
    pub fn get(&self) -> Strategy {
        self.conf.strategy
    }

    /// Switch to the strategy called `name`, ignoring case.
    ///
    /// An unknown name leaves the handle unchanged.
    pub fn set(self, name: &str) -> ConfdResult<&'a mut Conf> {
        self.conf.strategy = name.parse()?;
        Ok(self.conf)
    }
}
