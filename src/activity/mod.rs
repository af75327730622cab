// Remote activity ingestion entrypoint
pub mod types;       // wire shapes of the remote order feed
pub mod chain;       // remote chain tag -> chain id
pub mod normaliser;  // decimal strings -> base units, tokens -> currency ids
pub mod parser;      // remote activity -> SignatureDetails
pub mod router;      // deferred dispatch of book commands

pub use parser::{parse_remote, InvalidActivity};
pub use router::{spawn_applier, DeferredDispatcher, SignatureSink};
