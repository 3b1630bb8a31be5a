use std::fmt;

/// Stages a `MovePicker` walks through while handing out moves for the main search.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MainStage {
    TtMove,
    GoodCaptures,
    KillerOne,
    KillerTwo,
    CounterMove,
    Quiets,
    BadCaptures,
    Done,
}

impl MainStage {
    pub fn incr(&mut self) {
        *self = match *self {
            MainStage::TtMove => MainStage::GoodCaptures,
            MainStage::GoodCaptures => MainStage::KillerOne,
            MainStage::KillerOne => MainStage::KillerTwo,
            MainStage::KillerTwo => MainStage::CounterMove,
            MainStage::CounterMove => MainStage::Quiets,
            MainStage::Quiets => MainStage::BadCaptures,
            MainStage::BadCaptures => MainStage::Done,
            MainStage::Done => MainStage::Done,
        };
    }
}

/// Stages a `MovePicker` walks through while handing out moves for quiescence search.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum QStage {
    TtMove,
    Captures,
    Done,
}

impl QStage {
    pub fn incr(&mut self) {
        *self = match *self {
            QStage::TtMove => QStage::Captures,
            QStage::Captures => QStage::Done,
            QStage::Done => QStage::Done,
        };
    }
}

impl fmt::Display for MainStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

impl fmt::Display for QStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}
