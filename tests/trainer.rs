//! End-to-end behavior of a training session over an on-disk content tree

use std::fs;
use std::path::{Path, PathBuf};

use ctf_trainer::Trainer;
use ctf_trainer::app::{HintOutcome, SubmitOutcome};
use ctf_trainer::content::{Difficulty, GETTING_STARTED, QuestionKind, ResourceKind};
use ctf_trainer::progress::Stats;
use ctf_trainer::storage::StorePaths;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(path: PathBuf, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// A content tree shaped like an instructor's export
fn content_tree(root: &Path) {
    let gs = root.join(GETTING_STARTED).join("Topic1");
    write(gs.join("topic_name.txt"), "Welcome\n");
    write(gs.join("Questions/1_Question.txt"), "[Read the syllabus.]{What is the flag format?}");
    write(gs.join("Answers/1_Answer.txt"), "CTF{...}|flag{...}");

    let osi = root.join("OSI/Beginner");
    let t1 = osi.join("Topic1");
    write(t1.join("Questions/1_Question.txt"), "{How many layers does the OSI model have?}");
    write(t1.join("Questions/2_Question.txt"), "Name the layer that routes packets.");
    write(t1.join("Prompt or Not/Prompt Style/PS_3_Question.txt"), "[A capture is attached.]");
    write(t1.join("Answers/1_Answer.txt"), "7|seven");
    write(t1.join("Answers/2_Answer.txt"), "Network");
    write(t1.join("Answers/3_Answer.txt"), "HTTP");
    write(t1.join("Hints/1_Hint.txt"), "Count them.");
    write(t1.join("Resources/3_Question.pcap"), "pcap");
    write(t1.join("Resources/diagram.png"), "png");
    write(t1.join("Documents/notes.pdf"), "pdf");
    write(t1.join("Resources/.DS_Store"), "");

    write(osi.join("Topic10/Questions/1_Question.txt"), "{Q10}");
    write(osi.join("Topic2/Questions/1_Question.txt"), "{Q2}");
    write(osi.join("TopicExtra/Questions/1_Question.txt"), "{QX}");

    let adv = root.join("OSI/Advanced/Topic1");
    write(adv.join("Questions/1_Question.txt"), "{Which protocol maps IP to MAC?}");
    write(adv.join("Answers/1_Answer.txt"), "ARP");
    write(adv.join("Hints/1_Hint.txt"), "Address Resolution");
}

struct Session {
    content: TempDir,
    data: TempDir,
}

impl Session {
    fn new() -> Self {
        let content = TempDir::new().unwrap();
        content_tree(content.path());
        Self { content, data: TempDir::new().unwrap() }
    }

    fn open(&self) -> Trainer {
        Trainer::open(&StorePaths::in_dir(self.data.path()))
    }
}

#[test]
fn navigation_over_content_tree() {
    let session = Session::new();
    let mut trainer = session.open();
    trainer.select_root(session.content.path(), false).unwrap();

    let modules: Vec<_> = trainer.content().list_modules().into_iter().collect();
    assert_eq!(modules, vec![GETTING_STARTED.to_string(), "OSI".to_string()]);
    assert_eq!(
        trainer.content().list_difficulties("OSI"),
        vec![Difficulty::Beginner, Difficulty::Advanced]
    );

    let topics: Vec<_> = trainer
        .content()
        .list_topics("OSI", Some(Difficulty::Beginner))
        .into_iter()
        .map(|t| t.dir_name)
        .collect();
    assert_eq!(topics, vec!["Topic1", "Topic2", "Topic10", "TopicExtra"]);

    let welcome = trainer.locate(GETTING_STARTED, None, "welcome").unwrap();
    assert_eq!(welcome.topic.dir_name, "Topic1");
    assert_eq!(welcome.topic.display_name, "Welcome");

    let loc = trainer.locate("OSI", Some(Difficulty::Beginner), "Topic1").unwrap();
    let questions = trainer.content().list_questions(&loc);
    let kinds: Vec<_> = questions.iter().map(|q| (q.kind, q.file_name.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            (QuestionKind::Regular, "1_Question.txt"),
            (QuestionKind::Regular, "2_Question.txt"),
            (QuestionKind::Prompt, "PS_3_Question.txt"),
        ]
    );

    let text = trainer.content().load_question(&loc, &questions[0]).unwrap();
    assert_eq!(text.literal_question(), "How many layers does the OSI model have?");
    let plain = trainer.content().load_question(&loc, &questions[1]).unwrap();
    assert_eq!(plain.display_text(), "Name the layer that routes packets.");
}

#[test]
fn resources_are_classified_and_scoped() {
    let session = Session::new();
    let mut trainer = session.open();
    trainer.select_root(session.content.path(), false).unwrap();
    let loc = trainer.locate("OSI", Some(Difficulty::Beginner), "Topic1").unwrap();

    let topic: Vec<_> = trainer
        .content()
        .list_topic_resources(&loc)
        .into_iter()
        .map(|r| (r.kind, r.file_name))
        .collect();
    assert_eq!(
        topic,
        vec![
            (ResourceKind::File, "3_Question.pcap".to_string()),
            (ResourceKind::Image, "diagram.png".to_string()),
            (ResourceKind::Pdf, "notes.pdf".to_string()),
        ]
    );

    assert!(trainer.content().list_question_resources(&loc, "PS_3_Question.txt").is_empty());
    let scoped = trainer.content().list_question_resources(&loc, "3_Question.txt");
    assert_eq!(scoped.len(), 1);

    let dest = TempDir::new().unwrap();
    let saved = scoped[0].copy_to(&dest.path().join("downloads")).unwrap();
    assert_eq!(fs::read_to_string(saved).unwrap(), "pcap");
}

#[test]
fn progress_survives_restart() {
    let session = Session::new();
    {
        let mut trainer = session.open();
        trainer.select_root(session.content.path(), false).unwrap();
        let loc = trainer.locate("OSI", Some(Difficulty::Beginner), "Topic1").unwrap();

        let mut submit = |q: &str, a: &str| trainer.submit_answer(&loc, q, a).unwrap();
        assert_eq!(submit("1_Question.txt", "8"), SubmitOutcome::Incorrect);
        assert_eq!(submit("1_Question.txt", "Seven"), SubmitOutcome::Correct);
        assert_eq!(submit("PS_3_Question.txt", "http"), SubmitOutcome::Correct);
    }

    let trainer = session.open();
    assert_eq!(trainer.root(), Some(session.content.path()));
    let loc = trainer.locate("OSI", Some(Difficulty::Beginner), "Topic1").unwrap();

    assert!(trainer.is_question_completed(&loc, "1_Question.txt"));
    assert!(trainer.is_question_completed(&loc, "PS_3_Question.txt"));
    assert!(!trainer.is_topic_completed(&loc));
    assert_eq!(trainer.topic_stats(&loc), Stats::new(3, 2));
    assert_eq!(trainer.overall_stats(), Stats::new(3, 2));
    assert_eq!(trainer.module_stats("OSI"), trainer.overall_stats());
}

#[test]
fn hints_penalize_by_difficulty() {
    let session = Session::new();
    let mut trainer = session.open();
    trainer.select_root(session.content.path(), false).unwrap();

    let beginner = trainer.locate("OSI", Some(Difficulty::Beginner), "Topic1").unwrap();
    let advanced = trainer.locate("OSI", Some(Difficulty::Advanced), "Topic1").unwrap();

    assert_eq!(
        trainer.reveal_hint(&beginner, "1_Question.txt").unwrap(),
        HintOutcome::Revealed { hint: "Count them.".into(), penalty: 0 }
    );
    assert_eq!(trainer.reveal_hint(&beginner, "2_Question.txt").unwrap(), HintOutcome::Unavailable);
    assert!(matches!(
        trainer.reveal_hint(&advanced, "1_Question.txt").unwrap(),
        HintOutcome::Revealed { penalty: 3, .. }
    ));

    assert_eq!(trainer.difficulty_stats("OSI", Some(Difficulty::Beginner)), Stats::default());
    assert_eq!(trainer.difficulty_stats("OSI", Some(Difficulty::Advanced)), Stats::new(3, 0));

    trainer.submit_answer(&advanced, "1_Question.txt", "arp").unwrap();
    assert!(trainer.is_difficulty_completed("OSI", Some(Difficulty::Advanced)));
    assert_eq!(trainer.difficulty_stats("OSI", Some(Difficulty::Advanced)), Stats::new(4, 1));
}

#[test]
fn reset_then_reload_is_empty() {
    let session = Session::new();
    let mut trainer = session.open();
    trainer.select_root(session.content.path(), false).unwrap();
    let welcome = trainer.locate(GETTING_STARTED, None, "Topic1").unwrap();

    trainer.submit_answer(&welcome, "1_Question.txt", "flag{...}").unwrap();
    assert!(trainer.is_module_completed(GETTING_STARTED));

    trainer.reset_progress().unwrap();
    let trainer = session.open();
    assert!(!trainer.is_module_completed(GETTING_STARTED));
    assert_eq!(trainer.overall_stats(), Stats::default());
    assert_eq!(trainer.module_completion(GETTING_STARTED), 0.0);
}

#[test]
fn config_export_and_import() {
    let session = Session::new();
    let mut trainer = session.open();
    trainer.select_root(session.content.path(), false).unwrap();

    let export = session.data.path().join("export.json");
    trainer.config().export_to(&export).unwrap();
    trainer.clear_roots().unwrap();
    assert_eq!(trainer.root(), None);

    trainer.import_config(&export).unwrap();
    assert_eq!(trainer.root(), Some(session.content.path()));
    assert_eq!(trainer.config().known_roots(), &[session.content.path().to_path_buf()]);
}
