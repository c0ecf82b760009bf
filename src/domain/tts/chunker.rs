/// Split `text` into chunks of at most `max_chars` characters.
///
/// Newlines are turned into spaces first, then words are taken by splitting
/// on single spaces. Every word is counted together with the space that
/// follows it, and the current chunk is closed before a word that would push
/// it over the budget. A single word longer than the budget still becomes a
/// chunk of its own. Chunks never end in the separator space and empty chunks
/// are never produced.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let text = text.replace('\n', " ");
    for word in text.split(' ') {
        let word = format!("{} ", word);
        let word_len = word.chars().count();

        if current_len + word_len > max_chars {
            push_chunk(&mut chunks, &current);
            current.clear();
            current_len = 0;
        }

        current.push_str(&word);
        current_len += word_len;
    }

    push_chunk(&mut chunks, &current);
    chunks
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let chunk = chunk.trim_end_matches(' ');
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
}
