use std::io::Cursor;
use wordtrie::{
    Config, Dictionary, DictionaryError, FeedbackPattern, GameError, GuessOutcome, Hints, Status,
};

fn get_test_words() -> Vec<&'static str> {
    vec![
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
        "creep", "speed", "geese", "those", "sores",
    ]
}

fn dictionary() -> Dictionary {
    Dictionary::from_words(Config::default(), get_test_words()).unwrap()
}

fn compatible_count(hints: &Hints) -> usize {
    get_test_words()
        .into_iter()
        .filter(|w| hints.compatible(w))
        .count()
}

#[test]
fn test_load_from_reader() {
    let text = "crane\n\n  slate  \ntrace\ncrane\n";
    let dictionary = Dictionary::from_reader(Config::default(), Cursor::new(text)).unwrap();
    assert_eq!(dictionary.len(), 3);
    assert!(dictionary.contains("slate"));
    assert_eq!(
        dictionary.words().collect::<Vec<_>>(),
        vec!["crane", "slate", "trace"]
    );
}

#[test]
fn test_rejects_malformed_words() {
    let err = Dictionary::from_words(Config::default(), ["crane", "cranes"]).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::Length {
            expected: 5,
            found: 6,
            ..
        }
    ));

    let err = Dictionary::from_words(Config::default(), ["cr@ne"]).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::InvalidSymbol {
            position: 2,
            found: '@',
            ..
        }
    ));
}

#[test]
fn test_custom_word_length() {
    let dictionary =
        Dictionary::from_words(Config::with_word_len(3), ["cat", "car", "dog"]).unwrap();
    assert_eq!(dictionary.len(), 3);
    assert_eq!(dictionary.word_len(), 3);
}

#[test]
fn test_unknown_reference() {
    let mut dictionary = dictionary();
    assert!(matches!(
        dictionary.new_game("zzzzz"),
        Err(GameError::UnknownReference(_))
    ));
}

#[test]
fn test_guess_narrows_candidates() {
    let mut dictionary = dictionary();
    let mut game = dictionary.new_game("crate").unwrap();
    assert_eq!(game.remaining(), 15);

    let outcome = game.guess("crane").unwrap();
    let mut hints = Hints::new(5);
    hints
        .fold("crane", &FeedbackPattern::generate("crate", "crane"))
        .unwrap();
    let expected = compatible_count(&hints);

    assert_eq!(
        outcome,
        GuessOutcome::Feedback {
            pattern: FeedbackPattern::parse("+++/+", 5).unwrap(),
            remaining: expected,
        }
    );
    assert_eq!(game.remaining(), expected);
    assert!(game.candidates().any(|w| w == "crate"));
    assert_eq!(game.candidates().count(), expected);
    assert_eq!(game.guesses_left(), 5);
}

#[test]
fn test_unknown_guess_costs_nothing() {
    let mut dictionary = dictionary();
    let mut game = dictionary.new_game("crate").unwrap();
    assert_eq!(game.guess("zebra").unwrap(), GuessOutcome::NotInDictionary);
    assert_eq!(game.guesses_left(), 6);
    assert!(matches!(game.guess("zeb"), Err(GameError::Word(_))));
}

#[test]
fn test_solving_ends_the_game() {
    let mut dictionary = dictionary();
    let mut game = dictionary.new_game("toast").unwrap();
    game.guess("roast").unwrap();
    assert_eq!(
        game.guess("toast").unwrap(),
        GuessOutcome::Solved { attempts: 2 }
    );
    assert_eq!(game.status(), Status::Won);
    assert!(matches!(game.guess("crane"), Err(GameError::Over)));
}

#[test]
fn test_running_out_of_guesses() {
    let config = Config {
        max_guesses: 2,
        ..Config::default()
    };
    let mut dictionary = Dictionary::from_words(config, get_test_words()).unwrap();
    let mut game = dictionary.new_game("crate").unwrap();

    assert!(matches!(
        game.guess("slate").unwrap(),
        GuessOutcome::Feedback { .. }
    ));
    match game.guess("trace").unwrap() {
        GuessOutcome::Lost { remaining, .. } => assert!(remaining >= 1),
        other => panic!("expected a loss, got {:?}", other),
    }
    assert_eq!(game.status(), Status::Lost);
    assert!(matches!(game.guess("crate"), Err(GameError::Over)));
}

#[test]
fn test_games_reuse_the_dictionary() {
    let mut dictionary = dictionary();
    {
        let mut game = dictionary.new_game("creep").unwrap();
        game.guess("speed").unwrap();
        game.guess("geese").unwrap();
        assert!(game.remaining() < 15);
    }

    let game = dictionary.new_game("slate").unwrap();
    assert_eq!(game.remaining(), 15);
    assert_eq!(game.candidates().count(), 15);
}

#[test]
fn test_epochs_increase_per_game() {
    let mut dictionary = dictionary();
    let first = dictionary.new_game("crane").unwrap().epoch();
    let second = dictionary.new_game("crane").unwrap().epoch();
    assert!(second > first);
}

#[test]
fn test_insert_during_a_game() {
    let mut dictionary = dictionary();
    {
        let mut game = dictionary.new_game("crate").unwrap();
        let before = game.guess("crane").map(|_| game.remaining()).unwrap();

        assert_eq!(game.insert("craze").unwrap(), true);
        assert_eq!(game.remaining(), before + 1);
        assert!(game.candidates().any(|w| w == "craze"));

        assert_eq!(game.insert("crank").unwrap(), true);
        assert_eq!(game.remaining(), before + 1);
        assert!(!game.candidates().any(|w| w == "crank"));
        assert_eq!(game.candidates().count(), before + 1);

        assert_eq!(game.insert("crane").unwrap(), false);
        assert!(game.insert("cr").is_err());

        let outcome = game.guess("craze").unwrap();
        assert!(matches!(outcome, GuessOutcome::Feedback { .. }));
        assert!(game.candidates().any(|w| w == "crate"));
    }

    assert_eq!(dictionary.len(), 17);
    assert!(dictionary.contains("crank"));
    let game = dictionary.new_game("crank").unwrap();
    assert!(game.candidates().any(|w| w == "crank"));
}

#[test]
fn test_inconsistent_feedback_is_rejected() {
    let mut dictionary = dictionary();
    let mut game = dictionary.new_game("crate").unwrap();
    game.apply_feedback("crane", FeedbackPattern::parse("+////", 5).unwrap())
        .unwrap();
    let err = game
        .apply_feedback("slate", FeedbackPattern::parse("+////", 5).unwrap())
        .unwrap_err();
    assert!(matches!(err, GameError::Hints(_)));
    assert_eq!(game.history().len(), 1);
}

#[test]
fn test_suggestions_are_ranked() {
    let mut dictionary = dictionary();
    let mut game = dictionary.new_game("toast").unwrap();
    let top = game.suggest(5);
    assert_eq!(top.len(), 5);
    for i in 1..top.len() {
        assert!(top[i - 1].entropy >= top[i].entropy);
    }

    game.guess("crane").unwrap();
    game.set_hard_mode(true);
    let candidates: Vec<String> = game.candidates().collect();
    for analysis in game.suggest(10) {
        assert!(candidates.contains(&analysis.word), "{} is not a candidate", analysis.word);
        assert!(analysis.is_possible_answer);
    }
}

#[test]
fn test_external_feedback_spends_an_attempt() {
    let config = Config {
        max_guesses: 1,
        ..Config::default()
    };
    let mut dictionary = Dictionary::from_words(config, get_test_words()).unwrap();
    let mut game = dictionary.new_game("crate").unwrap();

    let remaining = game
        .apply_feedback("slate", FeedbackPattern::generate("crate", "slate"))
        .unwrap();
    assert!(remaining >= 1);
    assert_eq!(game.guesses_left(), 0);
    assert_eq!(game.status(), Status::Lost);

    assert!(matches!(game.guess("crane"), Err(GameError::Over)));
    assert!(matches!(
        game.apply_feedback("crane", FeedbackPattern::generate("crate", "crane")),
        Err(GameError::Over)
    ));
    assert_eq!(game.history().len(), 1);
}

#[test]
fn test_external_winning_feedback_ends_the_game() {
    let mut dictionary = dictionary();
    let mut game = dictionary.new_game("crate").unwrap();
    assert_eq!(
        game.apply_feedback("crate", FeedbackPattern::parse("+++++", 5).unwrap())
            .unwrap(),
        1
    );
    assert_eq!(game.status(), Status::Won);
    assert!(matches!(game.guess("slate"), Err(GameError::Over)));
}
