//! Endgame knowledge external to the main search: bitbase-style KPK lookup and (eventually)
//! Syzygy tablebase probing.
//!
//! Syzygy probing itself is out of scope -- `SyzygyPath` / `SyzygyProbeDepth` are accepted as
//! UCI options and stored, but no probe is wired up.

pub mod bitbases;
