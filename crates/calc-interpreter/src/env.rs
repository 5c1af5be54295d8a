use rustc_hash::FxHashMap;

use std::fmt::{self, Display, Formatter};

/// Variable values, keyed by name. Owned by the caller and shared across
/// evaluations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Env {
    map: FxHashMap<String, f64>,
}

impl Env {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.map.get(name).copied()
    }

    pub fn set(&mut self, name: &str, value: f64) {
        match self.map.get_mut(name) {
            Some(entry) => *entry = value,
            None => {
                self.map.insert(name.to_string(), value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.map.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Lists one `name = value` line per variable, sorted by name.
impl Display for Env {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut vars = self.iter().collect::<Vec<_>>();
        vars.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        for (name, value) in vars {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Env {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self { map: iter.into_iter().map(|(name, value)| (name.into(), value)).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn set_overwrites() {
        let mut env = Env::default();
        env.set("x", 1.0);
        env.set("x", 2.0);
        assert_eq!(env.get("x"), Some(2.0));
        assert_eq!(env.iter().count(), 1);
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn collect_pairs() {
        let env = [("a", 1.0), ("b", 2.0)].into_iter().collect::<Env>();
        assert_eq!(env.get("a"), Some(1.0));
        let mut names = env.iter().map(|(name, _)| name).collect::<Vec<_>>();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn display_sorted_by_name() {
        let env = [("zeta", 0.5), ("a", -1.0), ("mid", 3.0)].into_iter().collect::<Env>();
        assert_eq!(env.to_string(), "a = -1\nmid = 3\nzeta = 0.5\n");
        assert_eq!(Env::default().to_string(), "");
    }
}
