//! Built-in hashtag apps.
//!
//! Each app is a hashtag convention for structured posts. Picking one seeds
//! the composer with its tag; the example snippet can be copied as a
//! template.

/// One hashtag app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashtagApp {
    pub tag: &'static str,
    pub description: &'static str,
    pub contract: &'static str,
    pub example: &'static str,
}

impl HashtagApp {
    /// Composer text that starts a post for this app.
    pub fn compose_seed(&self) -> String {
        format!("{} ", self.tag)
    }
}

pub const APPS: &[HashtagApp] = &[
    HashtagApp {
        tag: "#pay",
        description: "Send payments",
        contract: "cosmos1abc...def",
        example: "#pay $100 @bob #90days",
    },
    HashtagApp {
        tag: "#swap",
        description: "Swap assets",
        contract: "cosmos2def...abc",
        example: "#swap 50ATOM to OSMO @alice",
    },
    HashtagApp {
        tag: "#lend",
        description: "Lend assets",
        contract: "cosmos3ghi...jkl",
        example: "#lend 1000USDC @carol #5%APY",
    },
    HashtagApp {
        tag: "#invest",
        description: "Invest in assets",
        contract: "cosmos4mno...pqr",
        example: "#invest $500 @dao #6months",
    },
    HashtagApp {
        tag: "#node",
        description: "Create Cycles Node",
        contract: "cosmos5stu...vwx",
        example: "#node create @mynode #validator",
    },
];
