//! Name eligibility policy.
//!
//! Decides, from the name alone, whether a symbol is displayed at all.
//! Magic names (`__x__`) and private names (`_x`, excluding magic) are
//! hidden by default and opted back in individually; `all` admits
//! everything regardless.

/// True for `__x__`-form names.
pub fn is_magic(name: &str) -> bool {
    name.starts_with("__") && name.ends_with("__")
}

/// True for `_x`-form names that are not magic.
pub fn is_private(name: &str) -> bool {
    name.starts_with('_') && !is_magic(name)
}

/// Display policy for symbol names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameFilter {
    /// Include private (`_x`) names.
    pub private: bool,
    /// Include magic (`__x__`) names.
    pub magic: bool,
    /// Include every name, overriding the two flags above.
    pub all: bool,
}

impl NameFilter {
    /// True if the name passes the policy.
    pub fn admits(&self, name: &str) -> bool {
        if self.all {
            return true;
        }
        if !self.private && is_private(name) {
            return false;
        }
        if !self.magic && is_magic(name) {
            return false;
        }
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_names() {
        assert!(is_magic("__init__"));
        assert!(is_magic("____"));
        assert!(!is_magic("__init"));
        assert!(!is_magic("init__"));
        assert!(!is_magic("_private"));
    }

    #[test]
    fn private_names_exclude_magic() {
        assert!(is_private("_helper"));
        assert!(is_private("__mangled"));
        assert!(!is_private("__init__"));
        assert!(!is_private("public"));
    }

    #[test]
    fn default_policy_hides_private_and_magic() {
        let filter = NameFilter::default();
        assert!(filter.admits("walk"));
        assert!(!filter.admits("_helper"));
        assert!(!filter.admits("__init__"));
    }

    #[test]
    fn private_flag_admits_private_only() {
        let filter = NameFilter {
            private: true,
            ..NameFilter::default()
        };
        assert!(filter.admits("_helper"));
        assert!(!filter.admits("__init__"));
    }

    #[test]
    fn magic_flag_admits_magic_only() {
        let filter = NameFilter {
            magic: true,
            ..NameFilter::default()
        };
        assert!(filter.admits("__init__"));
        assert!(!filter.admits("_helper"));
    }

    #[test]
    fn all_flag_admits_everything() {
        let filter = NameFilter {
            all: true,
            ..NameFilter::default()
        };
        assert!(filter.admits("_helper"));
        assert!(filter.admits("__init__"));
        assert!(filter.admits("walk"));
    }
}
