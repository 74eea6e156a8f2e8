use wordtrie::{Epoch, Trie, TrieError};

fn trie_of(words: &[&str]) -> Trie {
    let mut trie = Trie::new();
    for word in words {
        trie.insert(word, Epoch::UNFILTERED).unwrap();
    }
    trie
}

fn pieces_of_children(trie: &Trie, id: wordtrie::NodeId) -> Vec<String> {
    trie.children(id)
        .map(|c| String::from_utf8_lossy(trie.piece(c)).into_owned())
        .collect()
}

#[test]
fn test_empty_trie() {
    let trie = Trie::new();
    assert_eq!(trie.size(Epoch::UNFILTERED), 0);
    assert_eq!(trie.enumerate(Epoch::UNFILTERED).count(), 0);
    assert!(!trie.search(""));
    assert!(!trie.search("cat"));
}

#[test]
fn test_split_on_divergence() {
    let trie = trie_of(&["CAT", "CAR"]);

    let root = trie.root();
    assert_eq!(pieces_of_children(&trie, root), vec!["CA"]);
    let shared = trie.children(root).next().unwrap();
    assert_eq!(pieces_of_children(&trie, shared), vec!["R", "T"]);
    assert_eq!(trie.size(Epoch::UNFILTERED), 2);
    assert_eq!(trie.node_count(), 4);
}

#[test]
fn test_insert_reports_duplicates() {
    let mut trie = Trie::new();
    assert_eq!(trie.insert("crane", Epoch::UNFILTERED), Ok(true));
    assert_eq!(trie.insert("crate", Epoch::UNFILTERED), Ok(true));
    assert_eq!(trie.insert("crane", Epoch::UNFILTERED), Ok(false));
    assert_eq!(trie.size(Epoch::UNFILTERED), 2);
}

#[test]
fn test_insert_search_round_trip() {
    let words = ["crane", "crate", "trace", "slate", "stare", "start", "toast", "roast"];
    let trie = trie_of(&words);
    for word in words {
        assert!(trie.search(word), "missing {}", word);
    }
    for absent in ["cra", "crat", "crates", "stars", "t", "", "zzzzz"] {
        assert!(!trie.search(absent), "unexpected {}", absent);
    }
}

#[test]
fn test_siblings_stay_sorted() {
    let trie = trie_of(&["dog", "cat", "eel", "ant", "bat"]);
    assert_eq!(
        pieces_of_children(&trie, trie.root()),
        vec!["ant", "bat", "cat", "dog", "eel"]
    );
}

#[test]
fn test_enumerate_follows_byte_order() {
    let mut words = vec![
        "zz", "aa", "A_", "a-", "_a", "-9", "09", "Zz", "ab", "9a", "__", "--",
    ];
    let trie = trie_of(&words);
    words.sort();
    let listed: Vec<String> = trie.enumerate(Epoch::UNFILTERED).collect();
    assert_eq!(listed, words);
}

#[test]
fn test_enumerate_is_restartable() {
    let trie = trie_of(&["crane", "crate", "trace"]);
    let first: Vec<String> = trie.enumerate(Epoch::UNFILTERED).take(2).collect();
    let all: Vec<String> = trie.enumerate(Epoch::UNFILTERED).collect();
    assert_eq!(first, vec!["crane", "crate"]);
    assert_eq!(all, vec!["crane", "crate", "trace"]);
}

#[test]
fn test_prefix_conflicts_are_rejected() {
    let mut trie = trie_of(&["CAT", "CAR"]);
    assert!(matches!(
        trie.insert("CA", Epoch::UNFILTERED),
        Err(TrieError::PrefixConflict { .. })
    ));
    assert!(matches!(
        trie.insert("C", Epoch::UNFILTERED),
        Err(TrieError::PrefixConflict { .. })
    ));
    assert!(matches!(
        trie.insert("CATS", Epoch::UNFILTERED),
        Err(TrieError::PrefixConflict { .. })
    ));
    assert!(matches!(
        trie.insert("", Epoch::UNFILTERED),
        Err(TrieError::PrefixConflict { .. })
    ));
    assert_eq!(trie.size(Epoch::UNFILTERED), 2);
    assert_eq!(trie.enumerate(Epoch::UNFILTERED).collect::<Vec<_>>(), vec!["CAR", "CAT"]);
}

#[test]
fn test_empty_word_lives_at_the_root() {
    let mut trie = Trie::new();
    assert_eq!(trie.insert("", Epoch::UNFILTERED), Ok(true));
    assert!(trie.search(""));
    assert_eq!(trie.size(Epoch::UNFILTERED), 1);
    assert_eq!(trie.enumerate(Epoch::UNFILTERED).collect::<Vec<_>>(), vec![""]);
    assert!(trie.insert("a", Epoch::UNFILTERED).is_err());
}

#[test]
fn test_word_inserted_for_an_epoch_is_hidden_from_it() {
    let mut trie = trie_of(&["crane"]);
    trie.insert("crate", Epoch(3)).unwrap();

    assert!(trie.search("crate"));
    assert_eq!(trie.size(Epoch(3)), 1);
    assert_eq!(trie.size(Epoch(4)), 2);
    assert_eq!(trie.size(Epoch::UNFILTERED), 2);
    assert_eq!(trie.enumerate(Epoch(3)).collect::<Vec<_>>(), vec!["crane"]);
}

#[test]
fn test_unfiltered_reinsert_clears_the_path() {
    let mut trie = Trie::new();
    trie.insert("CAT", Epoch(3)).unwrap();
    assert_eq!(trie.size(Epoch(3)), 0);

    assert_eq!(trie.insert("CAT", Epoch::UNFILTERED), Ok(false));
    assert_eq!(trie.size(Epoch(3)), 1);
}

#[test]
fn test_split_keeps_the_old_stamp_on_the_moved_tail() {
    let mut trie = Trie::new();
    trie.insert("CAT", Epoch(4)).unwrap();
    trie.insert("CAR", Epoch::UNFILTERED).unwrap();

    let shared = trie.children(trie.root()).next().unwrap();
    assert_eq!(trie.stamp(shared), Epoch::UNFILTERED);
    let stamps: Vec<(String, Epoch)> = trie
        .children(shared)
        .map(|c| (String::from_utf8_lossy(trie.piece(c)).into_owned(), trie.stamp(c)))
        .collect();
    assert_eq!(
        stamps,
        vec![("R".to_owned(), Epoch::UNFILTERED), ("T".to_owned(), Epoch(4))]
    );
    assert_eq!(trie.enumerate(Epoch(4)).collect::<Vec<_>>(), vec!["CAR"]);
    assert_eq!(trie.size(Epoch(5)), 2);
}

#[test]
fn test_pieces_live_in_the_arena() {
    let mut trie = Trie::with_block_size(8);
    for word in ["abcdefgh", "abcdxxxx", "zzzzzzzz"] {
        trie.insert(word, Epoch::UNFILTERED).unwrap();
    }
    let stats = trie.arena_stats();
    assert!(stats.blocks >= 2);
    assert_eq!(stats.bytes_used, 8 + 4 + 8);
    assert_eq!(trie.size(Epoch::UNFILTERED), 3);
}
