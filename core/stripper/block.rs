use crate::language::LanguageProfile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    active: Option<usize>,
}

impl ScanState {
    pub fn is_inside(&self) -> bool {
        self.active.is_some()
    }
}

pub fn update_block_state(line: &str, profile: &LanguageProfile, entry: ScanState) -> ScanState {
    if !profile.has_block_syntax() {
        return ScanState::default();
    }

    let pairs: Vec<_> = profile.block_pairs().collect();
    let mut state = entry;
    let mut i = 0;

    while i < line.len() {
        let rest = &line.as_bytes()[i..];
        match state.active {
            None => {
                let opened = pairs
                    .iter()
                    .enumerate()
                    .find(|(_, pair)| rest.starts_with(pair.start.as_bytes()));
                match opened {
                    Some((idx, pair)) => {
                        state.active = Some(idx);
                        i += pair.start.len();
                    }
                    None => i += 1,
                }
            }
            Some(idx) => {
                let close = pairs[idx].end;
                if rest.starts_with(close.as_bytes()) {
                    state.active = None;
                    i += close.len();
                } else {
                    i += 1;
                }
            }
        }
    }

    state
}

pub fn self_contained_block(line: &str, profile: &LanguageProfile) -> Option<String> {
    let block = profile.block?;
    let trimmed = line.trim();

    if trimmed.len() < block.start.len() + block.end.len()
        || !trimmed.starts_with(block.start)
        || !trimmed.ends_with(block.end)
        || trimmed.matches(block.start).count() != 1
        || trimmed.matches(block.end).count() != 1
    {
        return None;
    }

    let inner = trimmed[block.start.len()..trimmed.len() - block.end.len()].trim();
    if inner.is_empty() {
        return None;
    }
    Some(line.to_string())
}
