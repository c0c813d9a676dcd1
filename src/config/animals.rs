// * Static animal-group table for the Jogo do Bicho
// * 25 fixed groups, four consecutive dezenas each; group 25 closes the wheel at 00

// * Number of animal groups on the wheel
pub const GROUP_COUNT: usize = 25;

// * One group of the wheel: its 1-based number, display name and dezena window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimalGroup {
    pub number: u8,
    pub name: &'static str,
    pub dezenas: [u8; 4],
}

// * Canonical wheel order. The dezena windows are contiguous: group N covers
// * 4N-3 ..= 4N, with group 25 wrapping 97, 98, 99, 00.
pub static ANIMAL_GROUPS: [AnimalGroup; GROUP_COUNT] = [
    AnimalGroup { number: 1, name: "Avestruz", dezenas: [1, 2, 3, 4] },
    AnimalGroup { number: 2, name: "Águia", dezenas: [5, 6, 7, 8] },
    AnimalGroup { number: 3, name: "Burro", dezenas: [9, 10, 11, 12] },
    AnimalGroup { number: 4, name: "Borboleta", dezenas: [13, 14, 15, 16] },
    AnimalGroup { number: 5, name: "Cachorro", dezenas: [17, 18, 19, 20] },
    AnimalGroup { number: 6, name: "Cabra", dezenas: [21, 22, 23, 24] },
    AnimalGroup { number: 7, name: "Carneiro", dezenas: [25, 26, 27, 28] },
    AnimalGroup { number: 8, name: "Camelo", dezenas: [29, 30, 31, 32] },
    AnimalGroup { number: 9, name: "Cobra", dezenas: [33, 34, 35, 36] },
    AnimalGroup { number: 10, name: "Coelho", dezenas: [37, 38, 39, 40] },
    AnimalGroup { number: 11, name: "Cavalo", dezenas: [41, 42, 43, 44] },
    AnimalGroup { number: 12, name: "Elefante", dezenas: [45, 46, 47, 48] },
    AnimalGroup { number: 13, name: "Galo", dezenas: [49, 50, 51, 52] },
    AnimalGroup { number: 14, name: "Gato", dezenas: [53, 54, 55, 56] },
    AnimalGroup { number: 15, name: "Jacaré", dezenas: [57, 58, 59, 60] },
    AnimalGroup { number: 16, name: "Leão", dezenas: [61, 62, 63, 64] },
    AnimalGroup { number: 17, name: "Macaco", dezenas: [65, 66, 67, 68] },
    AnimalGroup { number: 18, name: "Porco", dezenas: [69, 70, 71, 72] },
    AnimalGroup { number: 19, name: "Pavão", dezenas: [73, 74, 75, 76] },
    AnimalGroup { number: 20, name: "Peru", dezenas: [77, 78, 79, 80] },
    AnimalGroup { number: 21, name: "Touro", dezenas: [81, 82, 83, 84] },
    AnimalGroup { number: 22, name: "Tigre", dezenas: [85, 86, 87, 88] },
    AnimalGroup { number: 23, name: "Urso", dezenas: [89, 90, 91, 92] },
    AnimalGroup { number: 24, name: "Veado", dezenas: [93, 94, 95, 96] },
    AnimalGroup { number: 25, name: "Vaca", dezenas: [97, 98, 99, 0] },
];

// * Resolves a dezena (00-99) to its group. Total: every input maps.
pub fn group_for_dezena(dezena: u8) -> &'static AnimalGroup {
    let d = (dezena as usize) % 100;
    // * Shift so that 00 lands at the end of the wheel instead of the start
    let idx = ((d + 99) % 100) / 4;
    &ANIMAL_GROUPS[idx]
}

// * Resolves the trailing two digits of a numeric token to its group.
// * Returns None for tokens shorter than two digits or with non-digit content.
pub fn group_for_value(value: &str) -> Option<&'static AnimalGroup> {
    if value.len() < 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let tail = &value[value.len() - 2..];
    let dezena: u8 = tail.parse().ok()?;
    Some(group_for_dezena(dezena))
}

// * Case- and accent-insensitive name lookup, for cross-checking animal words
// * scraped next to a prize value.
pub fn group_for_name(name: &str) -> Option<&'static AnimalGroup> {
    let wanted = fold_name(name);
    ANIMAL_GROUPS.iter().find(|g| fold_name(g.name) == wanted)
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c.to_lowercase().next().unwrap_or(c) {
            'á' | 'â' | 'ã' | 'à' => Some('a'),
            'é' | 'ê' => Some('e'),
            'í' => Some('i'),
            'ó' | 'ô' | 'õ' => Some('o'),
            'ú' => Some('u'),
            'ç' => Some('c'),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}
