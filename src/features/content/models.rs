//! Help and onboarding copy served as-is.

pub const SUPPORT_EMAIL: &str = "support@myplatform.com";
pub const LIVE_CHAT_HOURS: &str = "Available 9am - 6pm (Mon-Fri)";

pub struct FaqEntry {
    pub id: u32,
    pub question: &'static str,
    pub answer: &'static str,
}

pub struct InfoCard {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FAQ: [FaqEntry; 4] = [
    FaqEntry {
        id: 1,
        question: "How do I view my reports?",
        answer: "Go to the 'View Reports' page from the dashboard. Use filters or search to quickly find specific reports.",
    },
    FaqEntry {
        id: 2,
        question: "How can I manage report priorities?",
        answer: "Click on 'Manage Reports'. You can update priority levels: Normal, High, Urgent. High-priority reports are highlighted for easy tracking.",
    },
    FaqEntry {
        id: 3,
        question: "Can I filter reports by status?",
        answer: "Yes! You can filter reports by Pending, Approved, or Rejected using the status filter at the top of the View Reports page.",
    },
    FaqEntry {
        id: 4,
        question: "How do I contact support?",
        answer: "You can contact support by emailing support@myplatform.com or using the live chat feature available on the dashboard.",
    },
];

/// Key usage cards
pub const PRIMARY_INFO_CARDS: [InfoCard; 3] = [
    InfoCard {
        id: 1,
        title: "Dashboard Overview",
        description: "Access all your reports and track their statuses easily. The dashboard presents critical information at a glance with clear categorization.",
    },
    InfoCard {
        id: 2,
        title: "Report Categories",
        description: "Reports are divided into Pending, Approved, and Rejected. Click any report to view details, priority, and updates for effective monitoring.",
    },
    InfoCard {
        id: 3,
        title: "Benefits of Using the Platform",
        description: "Stay organized, prioritize urgent tasks, and gain insights from reports analytics. Save time and increase productivity efficiently.",
    },
];

/// Secondary details
pub const SECONDARY_INFO_CARDS: [InfoCard; 3] = [
    InfoCard {
        id: 4,
        title: "Tips for Efficient Use",
        description: "Use filters and search effectively to find reports quickly. Check timestamps and statuses regularly to stay updated.",
    },
    InfoCard {
        id: 5,
        title: "Engagement & Interaction",
        description: "Hover on cards for summaries, click for full details. Prioritize high-impact reports to make timely decisions.",
    },
    InfoCard {
        id: 6,
        title: "Security & Privacy",
        description: "All reports are securely stored and access is controlled. Your information is safe while using the platform.",
    },
];
