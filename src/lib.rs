// Module naming follows project convention (SPSC = Single-Producer Single-Consumer)
#[allow(non_snake_case)]
pub mod SPSC {
    pub mod Buffer {
        pub mod Buffer;
        pub mod Buffer_impl;
        pub mod layout;
        pub use Buffer::{RingBuffer, WideIndex}; // re-export for stable path
    }
    pub mod Structs {
        pub mod Range_Structs;
        pub use Range_Structs::{ContiguousSlot, IndexRange, RangePair}; // re-export for stable path
    }

    mod builder;
    mod consumer;
    mod producer;

    pub use builder::ChannelBuilder;
    pub use consumer::Consumer;
    pub use producer::Producer;
}

#[allow(non_snake_case)]
pub mod Framing {
    pub mod StateMachine {
        pub mod StateMachine;
        pub mod StateMachine_impl;
        pub use StateMachine::{Parser, ParserStatus, Progress}; // re-export for stable path
    }
    pub mod Structs {
        pub mod Frame_Structs;
        pub use Frame_Structs::{FrameLayout, LengthWidth}; // re-export for stable path
    }
    pub mod checksum;
    pub mod encoder;
    pub mod magic;
    pub mod reader;

    pub use encoder::FrameEncoder;
    pub use StateMachine::{Parser, ParserStatus, Progress};
    pub use magic::{FixedMagic, MagicMatcher};
    pub use reader::{FrameReader, ReaderStats};
}

#[allow(non_snake_case)]
mod Core {
    pub(crate) mod storage;
}

#[allow(non_snake_case)]
mod Debug {
    pub mod StructDebug;
}

pub mod error;
pub mod ffi;

pub use error::{ConfigError, FrameError};
