//! Initial content for a store that has never been written.

use chrono::{DateTime, Duration, Utc};

use crate::{ChecklistItem, Folder, Task, DEFAULT_FOLDER_ID};

pub fn seed_folders() -> Vec<Folder> {
    vec![
        Folder::default_folder(),
        Folder::with_id("shopping", "تسوق"),
        Folder::with_id("work", "عمل"),
    ]
}

/// A pinned welcome note, a shopping checklist and a completed task,
/// timestamped a few seconds before `now`.
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let mut welcome = Task::new_text(
        "مهمة ترحيبية",
        "هذه أول مهمة لك! يمكنك إدارتها وتثبيتها أو إكمالها.",
    )
    .with_folder(DEFAULT_FOLDER_ID);
    welcome.is_pinned = true;
    welcome.created_at = now - Duration::seconds(10);
    welcome.background_color = Some("#FFFDE7".to_string());
    welcome.emoji = Some("👋".to_string());

    let mut eggs = ChecklistItem::new("بيض");
    eggs.is_completed = true;
    let mut shopping = Task::new_checklist(
        "قائمة التسوق",
        vec![ChecklistItem::new("حليب"), eggs, ChecklistItem::new("خبز")],
    )
    .with_folder("shopping");
    shopping.created_at = now - Duration::seconds(5);
    shopping.background_color = Some("#E6F4EA".to_string());
    shopping.emoji = Some("🛒".to_string());

    let mut report = Task::new_text(
        "الانتهاء من تقرير المشروع",
        "مراجعة البيانات النهائية وكتابة الخلاصة.",
    )
    .with_folder("work");
    report.is_completed = true;
    report.created_at = now - Duration::seconds(15);
    report.background_color = Some("#E8F0FE".to_string());
    report.emoji = Some("📊".to_string());

    vec![welcome, shopping, report]
}
