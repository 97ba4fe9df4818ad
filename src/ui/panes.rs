use crate::dataset::DatasetKind;

/// Chart cards in focus order. Each card is backed by one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Card {
    /// Card 1: bar chart of weekly / MTD issues per channel
    Channel,
    /// Card 2: radial (gauge) bars per category
    Category,
    /// Card 3: pie-style share strip of bug severities
    Bugs,
    /// Card 4: line chart of response and resolution times
    Time,
}

impl Card {
    pub const ALL: [Card; 4] = [Card::Channel, Card::Category, Card::Bugs, Card::Time];

    pub const COUNT: usize = 4;

    pub fn dataset(self) -> DatasetKind {
        match self {
            Card::Channel => DatasetKind::Channel,
            Card::Category => DatasetKind::Category,
            Card::Bugs => DatasetKind::Bugs,
            Card::Time => DatasetKind::Time,
        }
    }

    pub fn from_dataset(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Channel => Card::Channel,
            DatasetKind::Category => Card::Category,
            DatasetKind::Bugs => Card::Bugs,
            DatasetKind::Time => Card::Time,
        }
    }

    pub fn title(self) -> &'static str {
        self.dataset().title()
    }

    pub fn digit(self) -> char {
        match self {
            Card::Channel => '1',
            Card::Category => '2',
            Card::Bugs => '3',
            Card::Time => '4',
        }
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Card::Channel),
            '2' => Some(Card::Category),
            '3' => Some(Card::Bugs),
            '4' => Some(Card::Time),
            _ => None,
        }
    }

    /// Next card, wrapping around
    pub fn next(self) -> Self {
        match self {
            Card::Channel => Card::Category,
            Card::Category => Card::Bugs,
            Card::Bugs => Card::Time,
            Card::Time => Card::Channel,
        }
    }

    /// Previous card, wrapping around
    pub fn prev(self) -> Self {
        match self {
            Card::Channel => Card::Time,
            Card::Category => Card::Channel,
            Card::Bugs => Card::Category,
            Card::Time => Card::Bugs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_prev_cycle_through_all_cards() {
        let mut card = Card::Channel;
        for expected in [Card::Category, Card::Bugs, Card::Time, Card::Channel] {
            card = card.next();
            assert_eq!(card, expected);
        }
        for start in Card::ALL {
            assert_eq!(start.next().prev(), start);
        }
    }

    #[test]
    fn digits_and_datasets_agree() {
        for card in Card::ALL {
            assert_eq!(Card::from_digit(card.digit()), Some(card));
            assert_eq!(Card::from_dataset(card.dataset()), card);
        }
        assert_eq!(Card::from_digit('5'), None);
    }
}
