//! Rotor cipher machine simulator.
//!
//! Simulates an Enigma-class machine: a reflector, optional fixed rotors
//! and a bank of moving rotors with ring settings, a plugboard, and the
//! notch-driven stepping mechanism including the double-step anomaly.
//! The machine is self-reciprocal: the same setup that encrypts a message
//! also decrypts it.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (ordered symbols <-> indices 0..size)
//!     ↓ shared through Arc
//! Permutation  (cycle notation -> forward/inverse lookup tables)
//!     ↓ wiring of
//! Rotor        (fixed | moving | reflecting, setting + ring setting)
//!     ↓ catalog + slots
//! Machine      (stepping, plugboard, forward/backward signal path)
//!     ↓ driven by
//! config / settings / session  (text formats and line processing)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt with the same setup:
//!
//! ```
//! use enigma::config::parse_config;
//! use enigma::settings::apply_settings;
//!
//! let config = "ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I     MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! III   MV  (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//! IV    MJ  (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
//! Beta  N   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B     R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
//! ";
//! let setup = "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)";
//!
//! let mut encoder = parse_config(config).unwrap();
//! apply_settings(&mut encoder, setup).unwrap();
//! let cipher = encoder.convert_line("FROM HIS SHOULDER HIAWATHA").unwrap();
//! assert_eq!(cipher, "QVPQ SOK OILPUBKJ ZPISFXDW");
//!
//! let mut decoder = parse_config(config).unwrap();
//! apply_settings(&mut decoder, setup).unwrap();
//! assert_eq!(
//!     decoder.convert_line(&cipher).unwrap(),
//!     "FROM HIS SHOULDER HIAWATHA"
//! );
//! ```

#![deny(clippy::all)]

pub mod config;
pub mod error;
pub mod session;
pub mod settings;
pub mod utils;

mod alphabet;
mod machine;
mod permutation;
mod rotor;

pub use alphabet::{Alphabet, UPPER_CASE};
pub use error::EnigmaError;
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
