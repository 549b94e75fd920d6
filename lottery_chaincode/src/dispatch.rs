//! Invoke routing.
//!
//! `invoke` arrives as a function name plus positional string arguments.
//! [`Operation::parse`] turns that into a closed enum, validating argument
//! counts and the wager on the way, and the [`Handler`] trait is dispatched
//! over it with `enum_dispatch`.

use crate::config::ChaincodeConfig;
use crate::errors::{ChaincodeError, ChaincodeResult, ValidationError};
use crate::ledger::{AccountRegistry, Balance};
use crate::lottery::WagerResolver;
use crate::query::QueryService;
use crate::state::StateStore;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// Executes one parsed operation, returning the response payload
#[enum_dispatch]
pub trait Handler {
    fn handle(
        &self,
        store: &mut dyn StateStore,
        config: &ChaincodeConfig,
    ) -> ChaincodeResult<String>;
}

/// `query()` reports pool health, `query(id)` an account balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub account: Option<String>,
}

/// `lottery(id, wager)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lottery {
    pub account: String,
    pub wager: Balance,
}

/// `create_user(id)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    pub account: String,
}

/// Every operation `invoke` accepts
#[enum_dispatch(Handler)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Query(Query),
    Lottery(Lottery),
    CreateUser(CreateUser),
}

impl Operation {
    /// Parse an invoke function name and its arguments
    ///
    /// # Errors
    ///
    /// * `ChaincodeError::UnknownOperation` - Unrecognised function name
    /// * `ValidationError::Arguments` - Wrong argument count
    /// * `ValidationError::WagerNotInteger` - Lottery wager is not an integer
    ///
    /// # Examples
    ///
    /// ```
    /// use lottery_chaincode::dispatch::{Lottery, Operation};
    ///
    /// let args = vec!["alice".to_string(), "700".to_string()];
    /// let op = Operation::parse("lottery", &args).unwrap();
    /// assert_eq!(
    ///     op,
    ///     Operation::Lottery(Lottery { account: "alice".into(), wager: 700 })
    /// );
    /// assert!(Operation::parse("transfer", &args).is_err());
    /// ```
    pub fn parse(function: &str, args: &[String]) -> ChaincodeResult<Self> {
        match function {
            "query" => Ok(Query {
                account: args.first().cloned(),
            }
            .into()),
            "lottery" => {
                let [account, wager] = expect_args::<2>("lottery", args)?;
                let wager = wager
                    .parse()
                    .map_err(|_| ValidationError::WagerNotInteger(wager.clone()))?;
                Ok(Lottery {
                    account: account.clone(),
                    wager,
                }
                .into())
            }
            "create_user" => {
                let [account] = expect_args::<1>("create_user", args)?;
                Ok(CreateUser {
                    account: account.clone(),
                }
                .into())
            }
            other => Err(ChaincodeError::UnknownOperation {
                function: other.to_string(),
            }),
        }
    }

    /// Function name as invoked
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Query(_) => "query",
            Operation::Lottery(_) => "lottery",
            Operation::CreateUser(_) => "create_user",
        }
    }

    /// Static name of a recognised invoke function, regardless of its arguments
    pub fn lookup_name(function: &str) -> Option<&'static str> {
        ["query", "lottery", "create_user"]
            .into_iter()
            .find(|name| *name == function)
    }
}

fn expect_args<'a, const N: usize>(
    operation: &'static str,
    args: &'a [String],
) -> ChaincodeResult<&'a [String; N]> {
    args.try_into().map_err(|_| {
        ValidationError::Arguments {
            operation,
            expected: N,
            got: args.len(),
        }
        .into()
    })
}

impl Handler for Query {
    fn handle(
        &self,
        store: &mut dyn StateStore,
        config: &ChaincodeConfig,
    ) -> ChaincodeResult<String> {
        let query = QueryService::new(config);
        match &self.account {
            Some(id) => Ok(query.balance(store, id)?.to_string()),
            None => Ok(query.pool_status(store)?.to_string()),
        }
    }
}

impl Handler for Lottery {
    fn handle(
        &self,
        store: &mut dyn StateStore,
        config: &ChaincodeConfig,
    ) -> ChaincodeResult<String> {
        let receipt = WagerResolver::new(config).lottery(store, &self.account, self.wager)?;
        Ok(receipt.resolution.outcome.message().to_string())
    }
}

impl Handler for CreateUser {
    fn handle(
        &self,
        store: &mut dyn StateStore,
        config: &ChaincodeConfig,
    ) -> ChaincodeResult<String> {
        let balance = AccountRegistry::new(config).create_user(store, &self.account)?;
        Ok(balance.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_query_variants() {
        assert_eq!(
            Operation::parse("query", &[]).unwrap(),
            Operation::Query(Query { account: None })
        );
        // Trailing arguments are ignored.
        assert_eq!(
            Operation::parse("query", &args(&["alice", "extra"])).unwrap(),
            Operation::Query(Query {
                account: Some("alice".into())
            })
        );
    }

    #[test]
    fn test_parse_argument_counts() {
        for (function, given) in [
            ("lottery", args(&["alice"])),
            ("lottery", args(&["alice", "1", "2"])),
            ("create_user", args(&[])),
            ("create_user", args(&["a", "b"])),
        ] {
            let err = Operation::parse(function, &given).unwrap_err();
            assert_eq!(err.client_message(), "params error", "{function} {given:?}");
        }
    }

    #[test]
    fn test_parse_bad_wager() {
        let err = Operation::parse("lottery", &args(&["alice", "ten"])).unwrap_err();
        assert_eq!(
            err,
            ChaincodeError::Validation(ValidationError::WagerNotInteger("ten".into()))
        );
        assert_eq!(err.client_message(), "wager error!");
    }

    #[test]
    fn test_parse_negative_wager_is_accepted() {
        let op = Operation::parse("lottery", &args(&["alice", "-5"])).unwrap();
        assert_eq!(
            op,
            Operation::Lottery(Lottery {
                account: "alice".into(),
                wager: -5
            })
        );
    }

    #[test]
    fn test_parse_unknown_function() {
        let err = Operation::parse("Query", &[]).unwrap_err();
        assert!(matches!(err, ChaincodeError::UnknownOperation { function } if function == "Query"));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::parse("query", &[]).unwrap().name(), "query");
        assert_eq!(
            Operation::parse("create_user", &args(&["a"]))
                .unwrap()
                .name(),
            "create_user"
        );
    }

    #[test]
    fn test_lookup_name() {
        assert_eq!(Operation::lookup_name("lottery"), Some("lottery"));
        assert_eq!(Operation::lookup_name("create_user"), Some("create_user"));
        assert_eq!(Operation::lookup_name("Query"), None);
        assert_eq!(Operation::lookup_name("transfer"), None);
    }
}
