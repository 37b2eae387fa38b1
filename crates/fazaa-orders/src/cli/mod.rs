/*
[INPUT]:  Parsed CLI subcommands
[OUTPUT]: Non-interactive command implementations
[POS]:    CLI module for fazaa-orders binary
[UPDATE]: When adding headless subcommands
*/

pub mod list;
