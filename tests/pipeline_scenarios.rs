//! End-to-end tokenization scenarios through the public API.

use wordpiece::analysis::token_filter::punctuation::PunctuationSplitFilter;
use wordpiece::analysis::token_filter::wordpiece::WordPieceFilter;
use wordpiece::prelude::*;

use std::sync::Arc;

fn bert_vocabulary() -> Vocabulary {
    Vocabulary::builder()
        .entries([
            ("[CLS]", 0),
            ("[SEP]", 1),
            ("[UNK]", 2),
            ("un", 3),
            ("##aff", 4),
            ("##able", 5),
        ])
        .build()
        .unwrap()
}

fn mixed_vocabulary() -> Vocabulary {
    Vocabulary::builder()
        .entries([
            ("[CLS]", 0),
            ("[SEP]", 1),
            ("[UNK]", 2),
            ("a", 5),
            ("b", 6),
            ("[", 7),
            ("]", 8),
            ("MASK", 9),
            ("你", 10),
            ("好", 11),
            ("!", 12),
            ("hello", 13),
            ("world", 14),
            ("##s", 15),
        ])
        .added_token(AddedToken::special("[MASK]").with_id(99))
        .build()
        .unwrap()
}

#[test]
fn test_greedy_subwords() -> Result<()> {
    let pipeline = Pipeline::new(bert_vocabulary());
    assert_eq!(pipeline.tokenize("unaffable", false)?, vec![0, 3, 4, 5, 1]);
    Ok(())
}

#[test]
fn test_undecomposable_word_is_unknown() -> Result<()> {
    let pipeline = Pipeline::new(bert_vocabulary());
    assert_eq!(pipeline.tokenize("unaffableX", false)?, vec![0, 2, 1]);
    Ok(())
}

#[test]
fn test_cjk_ideographs_are_isolated() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    assert_eq!(pipeline.tokenize("你好", false)?, vec![0, 10, 11, 1]);
    assert_eq!(pipeline.tokenize("hello你好world", false)?, vec![0, 13, 10, 11, 14, 1]);
    Ok(())
}

#[test]
fn test_special_token_is_protected() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    assert_eq!(pipeline.tokenize("a [MASK] b", false)?, vec![0, 5, 99, 6, 1]);
    assert_eq!(pipeline.tokenize("[MASK]", false)?, vec![0, 99, 1]);
    assert_eq!(pipeline.tokenize("a[MASK]!", false)?, vec![0, 5, 99, 12, 1]);
    Ok(())
}

#[test]
fn test_special_token_splits_when_allowed() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    assert_eq!(pipeline.tokenize("[MASK]", true)?, vec![0, 7, 9, 8, 1]);
    Ok(())
}

#[test]
fn test_empty_and_blank_input() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    for text in ["", " ", "\n\t  \u{3000}"] {
        assert_eq!(pipeline.tokenize(text, false)?, vec![0, 1], "{text:?}");
    }
    Ok(())
}

#[test]
fn test_output_is_wrapped_in_sentinels() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    for text in ["a", "zzz", "hello worlds!", "你好 [MASK]", "\u{FFFD}"] {
        let ids = pipeline.tokenize(text, false)?;
        assert!(ids.len() >= 2);
        assert_eq!(ids.first(), Some(&pipeline.bos_id()));
        assert_eq!(ids.last(), Some(&pipeline.eos_id()));
    }
    Ok(())
}

#[test]
fn test_every_id_comes_from_the_vocabulary() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    let vocab = pipeline.vocabulary();

    for id in pipeline.tokenize("hello, worlds! 你好吗 [MASK]x ¿qué?", false)? {
        assert!(vocab.id_to_token(id).is_some(), "id {id}");
    }
    Ok(())
}

#[test]
fn test_word_length_boundary() -> Result<()> {
    let vocab = Vocabulary::builder()
        .entries([("[CLS]", 0), ("[SEP]", 1), ("[UNK]", 2), ("a", 3), ("##a", 4)])
        .max_input_chars_per_word(4)
        .build()?;
    let pipeline = Pipeline::new(vocab);

    assert_eq!(pipeline.tokenize("aaaa", false)?, vec![0, 3, 4, 4, 4, 1]);
    assert_eq!(pipeline.tokenize("aaaaa", false)?, vec![0, 2, 1]);
    Ok(())
}

#[test]
fn test_legacy_options() -> Result<()> {
    let pipeline = Pipeline::with_options(mixed_vocabulary(), PipelineOptions::legacy());

    // one word, and "##好" is not in the vocabulary
    assert_eq!(pipeline.tokenize("你好", false)?, vec![0, 2, 1]);
    assert_eq!(pipeline.tokenize("[MASK]", false)?, vec![0, 7, 9, 8, 1]);
    assert_eq!(pipeline.tokenize("a b!", false)?, vec![0, 5, 6, 12, 1]);
    Ok(())
}

#[test]
fn test_analyze_reports_offsets_into_input() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    let text = "  hello你好!worlds [MASK]";
    let tokens = pipeline.analyze(text, false)?;

    let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["hello", "你", "好", "!", "world", "##s", "[MASK]"]);

    for token in tokens.iter().filter(|t| !t.text.starts_with("##")) {
        assert_eq!(&text[token.start_offset..token.end_offset], token.text);
    }
    let suffix = &tokens[5];
    assert_eq!(&text[suffix.start_offset..suffix.end_offset], "s");
    assert_eq!(suffix.token_type, Some(TokenType::Subword));
    Ok(())
}

#[test]
fn test_batch_matches_sequential() -> Result<()> {
    let pipeline = Pipeline::new(mixed_vocabulary());
    let texts: Vec<String> = (0..64)
        .map(|i| match i % 4 {
            0 => "hello worlds".to_string(),
            1 => format!("a{i} [MASK] b"),
            2 => "你好!".repeat(i),
            _ => String::new(),
        })
        .collect();

    let batch = pipeline.tokenize_batch(&texts, false)?;
    assert_eq!(batch.len(), texts.len());
    for (text, ids) in texts.iter().zip(&batch) {
        assert_eq!(&pipeline.tokenize(text, false)?, ids);
    }
    Ok(())
}

#[test]
fn test_pipeline_shared_across_threads() -> Result<()> {
    let pipeline = Arc::new(Pipeline::new(mixed_vocabulary()));
    let expected = pipeline.tokenize("hello 你好 [MASK]", false)?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || pipeline.tokenize("hello 你好 [MASK]", false))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap()?, expected);
    }
    Ok(())
}

#[test]
fn test_punctuation_split_is_idempotent() {
    let samples = ["a,b", "...", "«quoted»", "x—y", "end."];
    for sample in samples {
        let once: Vec<&str> = PunctuationSplitFilter::split(sample)
            .into_iter()
            .map(|(range, _)| &sample[range])
            .collect();
        for piece in &once {
            let again: Vec<&str> = PunctuationSplitFilter::split(piece)
                .into_iter()
                .map(|(range, _)| &piece[range])
                .collect();
            assert_eq!(again, vec![*piece]);
        }
    }
}

#[test]
fn test_decompose_is_deterministic() {
    let filter = WordPieceFilter::new(Arc::new(bert_vocabulary()));
    let expected = filter.decompose("unaffable");
    assert_eq!(expected, vec!["un", "##aff", "##able"]);
    for _ in 0..100 {
        assert_eq!(filter.decompose("unaffable"), expected);
    }
}
