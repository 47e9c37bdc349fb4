//! Gas price provider implementations
//!
//! Flat tier prices: [`EtherchainOrg`], [`Metamask`], [`PoaNetwork`],
//! [`EthGasStation`], [`Etherscan`], [`Polygonscan`], [`GasNow`],
//! [`EthGasWatch`]. EIP-1559 fee pairs: [`Metamask1559`].

pub mod etherchain;
pub mod etherscan;
pub mod ethgasstation;
pub mod ethgaswatch;
pub mod gasnow;
pub mod metamask;
pub mod poa;

pub use etherchain::EtherchainOrg;
pub use etherscan::{Etherscan, Polygonscan};
pub use ethgasstation::EthGasStation;
pub use ethgaswatch::EthGasWatch;
pub use gasnow::GasNow;
pub use metamask::{Metamask, Metamask1559};
pub use poa::PoaNetwork;
