// * Static lottery registry: identifiers, source URL chains and format keywords
// * Loaded once at startup and passed into the pipeline, never mutated mid-run

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Enumerated key for every banca/draw schedule the pipeline tracks.
///
/// The slug form (see `Display`/`FromStr`) doubles as the storage key and
/// as matching input for the keyword→format table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LotteryId {
    RioPtm,
    RioPt,
    RioPtv,
    RioPtn,
    RioCoruja,
    Federal,
    LookGoias,
    Lotece,
    Lotep,
    BahiaMaluca,
}

// * Iteration order for batch runs; stable so reports stay diffable
pub static ALL_LOTTERIES: [LotteryId; 10] = [
    LotteryId::RioPtm,
    LotteryId::RioPt,
    LotteryId::RioPtv,
    LotteryId::RioPtn,
    LotteryId::RioCoruja,
    LotteryId::Federal,
    LotteryId::LookGoias,
    LotteryId::Lotece,
    LotteryId::Lotep,
    LotteryId::BahiaMaluca,
];

impl LotteryId {
    pub fn slug(&self) -> &'static str {
        match self {
            LotteryId::RioPtm => "rio-ptm",
            LotteryId::RioPt => "rio-pt",
            LotteryId::RioPtv => "rio-ptv",
            LotteryId::RioPtn => "rio-ptn",
            LotteryId::RioCoruja => "rio-coruja",
            LotteryId::Federal => "federal",
            LotteryId::LookGoias => "look-goias",
            LotteryId::Lotece => "lotece",
            LotteryId::Lotep => "lotep",
            LotteryId::BahiaMaluca => "bahia-maluca",
        }
    }

    // * Static source record for this identifier. Total: the registry below
    // * covers every variant.
    pub fn source(&self) -> &'static LotterySource {
        SOURCES
            .iter()
            .find(|s| s.id == *self)
            .unwrap_or(&SOURCES[0])
    }
}

impl fmt::Display for LotteryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for LotteryId {
    type Err = UnknownLottery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_LOTTERIES
            .iter()
            .find(|id| id.slug() == s)
            .copied()
            .ok_or_else(|| UnknownLottery(s.to_string()))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown lottery identifier: {0}")]
pub struct UnknownLottery(pub String);

/// Static per-lottery configuration: where results are published and when
/// draws happen. `backup_urls` preserve failover order.
#[derive(Debug, Clone, Copy)]
pub struct LotterySource {
    pub id: LotteryId,
    pub display_name: &'static str,
    pub primary_url: &'static str,
    pub backup_urls: &'static [&'static str],
    pub schedule: &'static str,
}

// * Failover chains. Primary first, backups in the order they should be tried.
pub static SOURCES: [LotterySource; 10] = [
    LotterySource {
        id: LotteryId::RioPtm,
        display_name: "Rio de Janeiro PTM",
        primary_url: "https://www.deunopostehoje.com.br/rio/ptm",
        backup_urls: &[
            "https://www.resultadodobicho.net.br/rj/ptm",
            "https://bancadobicho.com.br/resultados/rio-ptm",
        ],
        schedule: "seg-sab 11:20",
    },
    LotterySource {
        id: LotteryId::RioPt,
        display_name: "Rio de Janeiro PT",
        primary_url: "https://www.deunopostehoje.com.br/rio/pt",
        backup_urls: &[
            "https://www.resultadodobicho.net.br/rj/pt",
            "https://bancadobicho.com.br/resultados/rio-pt",
        ],
        schedule: "seg-sab 14:20",
    },
    LotterySource {
        id: LotteryId::RioPtv,
        display_name: "Rio de Janeiro PTV",
        primary_url: "https://www.deunopostehoje.com.br/rio/ptv",
        backup_urls: &[
            "https://www.resultadodobicho.net.br/rj/ptv",
            "https://bancadobicho.com.br/resultados/rio-ptv",
        ],
        schedule: "seg-sab 16:20",
    },
    LotterySource {
        id: LotteryId::RioPtn,
        display_name: "Rio de Janeiro PTN",
        primary_url: "https://www.deunopostehoje.com.br/rio/ptn",
        backup_urls: &[
            "https://www.resultadodobicho.net.br/rj/ptn",
            "https://bancadobicho.com.br/resultados/rio-ptn",
        ],
        schedule: "seg-sab 18:20",
    },
    LotterySource {
        id: LotteryId::RioCoruja,
        display_name: "Rio de Janeiro Coruja",
        primary_url: "https://www.deunopostehoje.com.br/rio/coruja",
        backup_urls: &["https://www.resultadodobicho.net.br/rj/coruja"],
        schedule: "seg-sab 21:20",
    },
    LotterySource {
        id: LotteryId::Federal,
        display_name: "Loteria Federal",
        primary_url: "https://www.deunopostehoje.com.br/federal",
        backup_urls: &[
            "https://www.resultadodobicho.net.br/federal",
            "https://bancadobicho.com.br/resultados/federal",
        ],
        schedule: "qua e sab 20:00",
    },
    LotterySource {
        id: LotteryId::LookGoias,
        display_name: "LOOK Goiás",
        primary_url: "https://www.lookloterias.com.br/resultados",
        backup_urls: &["https://www.resultadodobicho.net.br/go/look"],
        schedule: "seg-dom 07:30 ate 21:20",
    },
    LotterySource {
        id: LotteryId::Lotece,
        display_name: "Lotece Ceará",
        primary_url: "https://www.lotece-resultados.com.br/hoje",
        backup_urls: &["https://www.resultadodobicho.net.br/ce/lotece"],
        schedule: "seg-sab 11:00 14:00 19:00",
    },
    LotterySource {
        id: LotteryId::Lotep,
        display_name: "Lotep Paraíba",
        primary_url: "https://www.lotepresultado.com.br/resultado-do-dia",
        backup_urls: &["https://www.resultadodobicho.net.br/pb/lotep"],
        schedule: "seg-sab 10:45 12:45 18:00",
    },
    LotterySource {
        id: LotteryId::BahiaMaluca,
        display_name: "Bahia Maluca",
        primary_url: "https://www.resultadodobicho.net.br/ba/maluca",
        backup_urls: &["https://bancadobicho.com.br/resultados/bahia-maluca"],
        schedule: "seg-sab 15:00",
    },
];

/// One row of the keyword→format lookup: documents (or identifier slugs)
/// containing `keyword` are assumed to publish `prize_count` ranked prizes
/// of `digit_width` digits.
#[derive(Debug, Clone, Copy)]
pub struct KeywordFormat {
    pub keyword: &'static str,
    pub prize_count: usize,
    pub digit_width: u8,
}

// * Keywords are matched lowercase against both the identifier slug and the
// * document text. Ordering matters: first hit wins.
pub static KEYWORD_FORMATS: [KeywordFormat; 6] = [
    KeywordFormat { keyword: "look", prize_count: 10, digit_width: 4 },
    KeywordFormat { keyword: "lotece", prize_count: 10, digit_width: 4 },
    KeywordFormat { keyword: "coruja", prize_count: 7, digit_width: 4 },
    KeywordFormat { keyword: "maluca", prize_count: 7, digit_width: 4 },
    KeywordFormat { keyword: "federal", prize_count: 5, digit_width: 4 },
    // ! Lotinha publishes centenas, the one 3-digit format in the registry
    KeywordFormat { keyword: "lotinha", prize_count: 5, digit_width: 3 },
];
