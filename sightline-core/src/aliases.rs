//! Alias resolution — user-supplied tokens to canonical integer ids.
//!
//! Rule authors may identify a monster, move, or team by numeric id, by a
//! digit string, or by display name. All three forms collapse to a
//! canonical id set here, once, at filter construction — the predicates
//! themselves only ever see integers.
//!
//! Resolution rules:
//! - Integers and digit-only strings pass through unvalidated. An
//!   out-of-range id is legal configuration; it simply never matches a
//!   real event.
//! - Anything else is trimmed and looked up case-insensitively in the
//!   namespace's name table.
//! - A name miss is `Ok(None)`: under [`AliasPolicy::Lenient`] the token
//!   matches nothing (fail-closed, logged at debug), under
//!   [`AliasPolicy::Strict`] construction fails instead.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde_json::Value;

use crate::config::{opt_token_list, ConfigError, RuleMap};

/// The three independent id namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Monster,
    Move,
    Team,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Monster => "monster",
            Namespace::Move => "move",
            Namespace::Team => "team",
        }
    }
}

/// What to do with a display name that isn't in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasPolicy {
    /// Skip the token; the predicate never matches through it. This is the
    /// long-standing behavior and the default.
    #[default]
    Lenient,
    /// Reject the configuration at construction. Catches typos before the
    /// filter enters service.
    Strict,
}

/// Read-only name→id tables for the three namespaces, injected at filter
/// construction. Keys are lowercased once, here; lookups are
/// case-insensitive by construction.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    monsters: HashMap<String, u32>,
    moves: HashMap<String, u32>,
    teams: HashMap<String, u32>,
}

impl AliasTable {
    pub fn new<S, I>(monsters: I, moves: I, teams: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, u32)>,
    {
        Self {
            monsters: index(monsters),
            moves: index(moves),
            teams: index(teams),
        }
    }

    fn table(&self, namespace: Namespace) -> &HashMap<String, u32> {
        match namespace {
            Namespace::Monster => &self.monsters,
            Namespace::Move => &self.moves,
            Namespace::Team => &self.teams,
        }
    }

    /// Resolve a single token. `Ok(None)` means "valid name form, but not
    /// in the table" — the policy decision belongs to the caller.
    pub fn resolve(&self, namespace: Namespace, token: &Value) -> Result<Option<u32>, ConfigError> {
        match token {
            Value::Number(n) => match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                Some(id) => Ok(Some(id)),
                None => Err(invalid(namespace, token)),
            },
            Value::String(s) => {
                let s = s.trim();
                if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                    s.parse::<u32>().map(Some).map_err(|_| invalid(namespace, token))
                } else {
                    Ok(self.table(namespace).get(&s.to_lowercase()).copied())
                }
            }
            _ => Err(invalid(namespace, token)),
        }
    }

    /// Resolve a configured token list into a set of canonical ids.
    /// Duplicates collapse; order is irrelevant.
    pub fn resolve_set<T>(
        &self,
        namespace: Namespace,
        tokens: &[Value],
        policy: AliasPolicy,
    ) -> Result<HashSet<T>, ConfigError>
    where
        T: From<u32> + Eq + Hash,
    {
        let mut ids = HashSet::with_capacity(tokens.len());
        for token in tokens {
            match self.resolve(namespace, token)? {
                Some(id) => {
                    ids.insert(T::from(id));
                }
                None => match policy {
                    AliasPolicy::Strict => {
                        return Err(ConfigError::UnknownName {
                            namespace: namespace.as_str(),
                            name: token.as_str().unwrap_or_default().to_string(),
                        });
                    }
                    AliasPolicy::Lenient => {
                        tracing::debug!(
                            namespace = namespace.as_str(),
                            token = %token,
                            "alias name not found; token will never match"
                        );
                    }
                },
            }
        }
        Ok(ids)
    }

    /// Resolve the token list under `key`, if the key is present.
    pub fn resolve_key<T>(
        &self,
        config: &RuleMap,
        key: &str,
        namespace: Namespace,
        policy: AliasPolicy,
    ) -> Result<Option<HashSet<T>>, ConfigError>
    where
        T: From<u32> + Eq + Hash,
    {
        match opt_token_list(config, key)? {
            Some(tokens) => Ok(Some(self.resolve_set(namespace, tokens, policy)?)),
            None => Ok(None),
        }
    }
}

fn index<S: AsRef<str>, I: IntoIterator<Item = (S, u32)>>(entries: I) -> HashMap<String, u32> {
    entries
        .into_iter()
        .map(|(name, id)| (name.as_ref().trim().to_lowercase(), id))
        .collect()
}

fn invalid(namespace: Namespace, token: &Value) -> ConfigError {
    ConfigError::InvalidToken {
        namespace: namespace.as_str(),
        token: token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonsterId;
    use serde_json::json;

    fn table() -> AliasTable {
        AliasTable::new(
            vec![("Rayquaza", 384), ("Mewtwo", 150)],
            vec![("Present", 291), ("Solar Beam", 116)],
            vec![("Uncontested", 0), ("Mystic", 1), ("Valor", 2), ("Instinct", 3)],
        )
    }

    #[test]
    fn integers_pass_through_unvalidated() {
        let t = table();
        assert_eq!(t.resolve(Namespace::Monster, &json!(382)).unwrap(), Some(382));
        // Out of any real dex range, still accepted.
        assert_eq!(
            t.resolve(Namespace::Monster, &json!(900_000)).unwrap(),
            Some(900_000)
        );
    }

    #[test]
    fn digit_strings_parse_as_ids() {
        let t = table();
        assert_eq!(t.resolve(Namespace::Monster, &json!("383")).unwrap(), Some(383));
    }

    #[test]
    fn names_resolve_case_insensitively_with_trim() {
        let t = table();
        assert_eq!(
            t.resolve(Namespace::Monster, &json!("rAyQuAzA")).unwrap(),
            Some(384)
        );
        assert_eq!(
            t.resolve(Namespace::Move, &json!("  solar beam ")).unwrap(),
            Some(116)
        );
        assert_eq!(t.resolve(Namespace::Team, &json!("Instinct")).unwrap(), Some(3));
    }

    #[test]
    fn unknown_name_is_none_not_error() {
        let t = table();
        assert_eq!(t.resolve(Namespace::Monster, &json!("Missingno")).unwrap(), None);
    }

    #[test]
    fn non_scalar_tokens_are_invalid() {
        let t = table();
        assert!(t.resolve(Namespace::Monster, &json!(true)).is_err());
        assert!(t.resolve(Namespace::Monster, &json!(2.5)).is_err());
        assert!(t.resolve(Namespace::Monster, &json!([1])).is_err());
        assert!(t.resolve(Namespace::Monster, &json!(-3)).is_err());
    }

    #[test]
    fn resolve_set_mixes_forms_and_collapses_duplicates() {
        let t = table();
        let tokens = vec![json!(382), json!("383"), json!("Rayquaza"), json!("384")];
        let ids: HashSet<MonsterId> = t
            .resolve_set(Namespace::Monster, &tokens, AliasPolicy::Lenient)
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&MonsterId(382)));
        assert!(ids.contains(&MonsterId(383)));
        assert!(ids.contains(&MonsterId(384)));
    }

    #[test]
    fn lenient_policy_skips_misses() {
        let t = table();
        let tokens = vec![json!("Missingno"), json!(150)];
        let ids: HashSet<MonsterId> = t
            .resolve_set(Namespace::Monster, &tokens, AliasPolicy::Lenient)
            .unwrap();
        assert_eq!(ids, HashSet::from([MonsterId(150)]));
    }

    #[test]
    fn strict_policy_rejects_misses() {
        let t = table();
        let tokens = vec![json!("Missingno")];
        let err = t
            .resolve_set::<MonsterId>(Namespace::Monster, &tokens, AliasPolicy::Strict)
            .unwrap_err();
        match err {
            ConfigError::UnknownName { namespace, name } => {
                assert_eq!(namespace, "monster");
                assert_eq!(name, "Missingno");
            }
            other => panic!("expected UnknownName, got {other:?}"),
        }
    }
}
