// * Static configuration: tunable constants, the animal wheel and the
// * lottery registry. Everything here is immutable after process start and
// * handed to the pipeline explicitly, never read as ambient globals.

pub mod animals;
pub mod constants;
pub mod lotteries;

// * Re-exports for convenient access
pub use animals::{
    group_for_dezena, group_for_name, group_for_value, AnimalGroup, ANIMAL_GROUPS, GROUP_COUNT,
};
pub use lotteries::{
    KeywordFormat, LotteryId, LotterySource, UnknownLottery, ALL_LOTTERIES, KEYWORD_FORMATS,
    SOURCES,
};
