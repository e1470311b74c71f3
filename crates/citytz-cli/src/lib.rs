//! citytz-cli
//! ==========
//!
//! Command-line interface for the `citytz-core` city and timezone lookup.
//!
//! This crate primarily provides a binary (`citytz`). The library target
//! only exists so the overview below renders as documentation.
//!
//! Basic usage:
//!
//! ```text
//! citytz --help
//! citytz city Chicago
//! citytz search "springfield illinois"
//! citytz --output json iso DEU
//! citytz match zurich --exact
//! citytz build data/cityMap.bin.gz --gzip
//! printf 'Berlin\nTokyo\n' | citytz batch --rate-limit 10
//! ```
//!
//! Logging goes to stderr. `-v` raises the level; `RUST_LOG` overrides it.
//!
//! For programmatic access use the `citytz-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
