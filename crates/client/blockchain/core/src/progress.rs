//! Progress contract calls.
//!
//! Completed levels are saved as `completeLevel(uint256,uint256,uint256,uint8)`
//! calls, queued like any other operation.

use ethers_core::abi::{Token, encode};
use ethers_core::types::{Address, U256};
use ethers_core::utils::id;
use game_core::LevelCompletion;

use crate::types::Operation;

pub const COMPLETE_LEVEL_SIGNATURE: &str = "completeLevel(uint256,uint256,uint256,uint8)";

/// Deployed progress contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressContract {
    pub address: Address,
}

impl ProgressContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Calldata for `completeLevel(level, moves, elapsedSecs, stars)`.
    pub fn complete_level_calldata(completion: &LevelCompletion) -> Vec<u8> {
        let args = encode(&[
            Token::Uint(U256::from(completion.level)),
            Token::Uint(U256::from(completion.moves)),
            Token::Uint(U256::from(completion.elapsed_secs)),
            Token::Uint(U256::from(completion.stars.as_u8())),
        ]);

        let mut calldata = id(COMPLETE_LEVEL_SIGNATURE).to_vec();
        calldata.extend_from_slice(&args);
        calldata
    }

    /// Builds the queued operation that saves `completion`.
    pub fn save_progress(&self, completion: &LevelCompletion) -> Operation {
        Operation::call(
            self.address,
            Self::complete_level_calldata(completion),
            format!(
                "Save level {} ({} moves, {} stars)",
                completion.level,
                completion.moves,
                completion.stars.as_u8()
            ),
        )
    }
}
