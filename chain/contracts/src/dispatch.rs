//! Function dispatch — remote invocation surface of the rating contract
//!
//! Remote callers address operations by name and pass every argument as a
//! string. The dispatcher checks arity, parses typed arguments, runs the
//! operation, and returns the JSON payload handed back to the caller.

use std::fmt;
use std::str::FromStr;

use rating_types::ids::LedgerId;
use serde::Serialize;
use tracing::debug;

use crate::contract::RatingContract;
use crate::errors::InvokeError;
use crate::stub::LedgerStub;

/// Contract functions exposed to remote callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    InitLedger,
    ReadLedger,
    LedgerExists,
    RegisterRate,
    GetAllRatings,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::InitLedger,
        Function::ReadLedger,
        Function::LedgerExists,
        Function::RegisterRate,
        Function::GetAllRatings,
    ];

    /// Name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Function::InitLedger => "InitLedger",
            Function::ReadLedger => "ReadLedger",
            Function::LedgerExists => "LedgerExists",
            Function::RegisterRate => "RegisterRate",
            Function::GetAllRatings => "GetAllRatings",
        }
    }

    /// Number of string arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Function::InitLedger => 2,
            Function::ReadLedger | Function::LedgerExists | Function::GetAllRatings => 1,
            Function::RegisterRate => 3,
        }
    }

    /// Read-only functions are evaluated and never committed.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Function::ReadLedger | Function::LedgerExists | Function::GetAllRatings
        )
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Function {
    type Err = InvokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| InvokeError::UnknownFunction {
                name: s.to_string(),
            })
    }
}

impl RatingContract {
    /// Invoke `function` with string `args` and return the JSON payload.
    ///
    /// Write functions return an empty payload.
    pub fn invoke<S: LedgerStub>(
        &self,
        stub: &mut S,
        function: Function,
        args: &[String],
    ) -> Result<Vec<u8>, InvokeError> {
        if args.len() != function.arity() {
            return Err(InvokeError::ArgumentCount {
                function: function.name().to_string(),
                expected: function.arity(),
                got: args.len(),
            });
        }

        debug!(function = %function, args = args.len(), "Invoking contract function");

        match function {
            Function::InitLedger => {
                self.init_ledger(stub, &args[0], &args[1])?;
                Ok(Vec::new())
            }
            Function::ReadLedger => {
                let rating = self.read_ledger(stub, &LedgerId::new(args[0].as_str()))?;
                encode(&rating)
            }
            Function::LedgerExists => {
                let exists = self.ledger_exists(stub, &LedgerId::new(args[0].as_str()))?;
                encode(&exists)
            }
            Function::RegisterRate => {
                let rate = parse_rate(&args[1])?;
                self.register_rate(stub, &LedgerId::new(args[0].as_str()), rate, &args[2])?;
                Ok(Vec::new())
            }
            Function::GetAllRatings => {
                let records = self.get_all_ratings(stub, &LedgerId::new(args[0].as_str()))?;
                encode(&records)
            }
        }
    }

    /// Invoke a function addressed by its wire name.
    pub fn invoke_by_name<S: LedgerStub>(
        &self,
        stub: &mut S,
        name: &str,
        args: &[String],
    ) -> Result<Vec<u8>, InvokeError> {
        let function: Function = name.parse()?;
        self.invoke(stub, function, args)
    }
}

fn parse_rate(raw: &str) -> Result<i64, InvokeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InvokeError::InvalidArgument {
            name: "rate".to_string(),
            value: raw.to_string(),
        })
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, InvokeError> {
    serde_json::to_vec(value).map_err(|e| InvokeError::Encode {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RatingError;
    use crate::memory::MemoryLedger;
    use rating_types::history::HistoryQueryResult;
    use rating_types::rating::Rating;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_function_names_round_trip() {
        for function in Function::ALL {
            assert_eq!(function.name().parse::<Function>().unwrap(), function);
        }
    }

    #[test]
    fn test_unknown_function() {
        let err = "DeleteLedger".parse::<Function>().unwrap_err();
        assert_eq!(
            err,
            InvokeError::UnknownFunction {
                name: "DeleteLedger".to_string()
            }
        );
    }

    #[test]
    fn test_function_names_are_case_sensitive() {
        assert!("initledger".parse::<Function>().is_err());
    }

    #[test]
    fn test_read_only_classification() {
        assert!(!Function::InitLedger.is_read_only());
        assert!(!Function::RegisterRate.is_read_only());
        assert!(Function::ReadLedger.is_read_only());
        assert!(Function::LedgerExists.is_read_only());
        assert!(Function::GetAllRatings.is_read_only());
    }

    #[test]
    fn test_invoke_checks_arity() {
        let mut ledger = MemoryLedger::new();
        let contract = RatingContract::new();
        let mut tx = ledger.transaction();

        let err = contract
            .invoke(&mut tx, Function::RegisterRate, &args(&["u1:delivery", "5"]))
            .unwrap_err();
        assert_eq!(
            err,
            InvokeError::ArgumentCount {
                function: "RegisterRate".to_string(),
                expected: 3,
                got: 2,
            }
        );
    }

    #[test]
    fn test_invoke_rejects_non_numeric_rate() {
        let mut ledger = MemoryLedger::new();
        let contract = RatingContract::new();
        let mut tx = ledger.transaction();

        let err = contract
            .invoke(&mut tx, Function::RegisterRate, &args(&["u1:delivery", "five", "u2"]))
            .unwrap_err();
        assert!(matches!(err, InvokeError::InvalidArgument { ref name, .. } if name == "rate"));
    }

    #[test]
    fn test_invoke_full_flow() {
        let mut ledger = MemoryLedger::new();
        let contract = RatingContract::new();

        let payload = ledger
            .submit(|tx| contract.invoke_by_name(tx, "InitLedger", &args(&["u1", "delivery"])))
            .unwrap();
        assert!(payload.is_empty());

        ledger
            .submit(|tx| contract.invoke_by_name(tx, "RegisterRate", &args(&["u1:delivery", "5", "u2"])))
            .unwrap();

        let exists = ledger
            .evaluate(|tx| contract.invoke_by_name(tx, "LedgerExists", &args(&["u1:delivery"])))
            .unwrap();
        assert_eq!(exists, b"true");

        let read = ledger
            .evaluate(|tx| contract.invoke_by_name(tx, "ReadLedger", &args(&["u1:delivery"])))
            .unwrap();
        let rating: Rating = serde_json::from_slice(&read).unwrap();
        assert_eq!(rating.rate, 5);
        assert_eq!(rating.rated_by, "u2");

        let history = ledger
            .evaluate(|tx| contract.invoke_by_name(tx, "GetAllRatings", &args(&["u1:delivery"])))
            .unwrap();
        let records: Vec<HistoryQueryResult> = serde_json::from_slice(&history).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(ledger.open_feeds(), 0);
    }

    #[test]
    fn test_invoke_propagates_rating_errors() {
        let mut ledger = MemoryLedger::new();
        let contract = RatingContract::new();

        let err = ledger
            .evaluate(|tx| contract.invoke(tx, Function::ReadLedger, &args(&["ghost:svc"])))
            .unwrap_err();
        assert_eq!(
            err,
            InvokeError::Rating(RatingError::NotFound {
                ledger_id: "ghost:svc".to_string()
            })
        );
    }

    #[test]
    fn test_exists_payload_for_missing_key() {
        let mut ledger = MemoryLedger::new();
        let contract = RatingContract::new();
        let payload = ledger
            .evaluate(|tx| contract.invoke(tx, Function::LedgerExists, &args(&["nobody:svc"])))
            .unwrap();
        assert_eq!(payload, b"false");
    }

    #[test]
    fn test_history_payload_for_missing_key_is_empty_array() {
        let mut ledger = MemoryLedger::new();
        let contract = RatingContract::new();
        let payload = ledger
            .evaluate(|tx| contract.invoke(tx, Function::GetAllRatings, &args(&["nobody:svc"])))
            .unwrap();
        assert_eq!(payload, b"[]");
    }
}
