//! Built-in summary frameworks

use serde::{Deserialize, Serialize};

/// Code-defined summary types. The display name doubles as the type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltInType {
    Chronological,
    General,
    Sales,
    SalesSandler,
    SalesSpiced,
    SalesMeddpicc,
    SalesBant,
    QuestionsAndAnswers,
    Demo,
    CustomerSuccess,
    CustomerSuccessReach,
    OneOnOne,
    ProjectUpdate,
    ProjectKickOff,
    CandidateInterview,
    Retrospective,
    StandUp,
}

impl BuiltInType {
    /// Selector order.
    pub const ALL: [BuiltInType; 17] = [
        Self::Chronological,
        Self::General,
        Self::Sales,
        Self::SalesSandler,
        Self::SalesSpiced,
        Self::SalesMeddpicc,
        Self::SalesBant,
        Self::QuestionsAndAnswers,
        Self::Demo,
        Self::CustomerSuccess,
        Self::CustomerSuccessReach,
        Self::OneOnOne,
        Self::ProjectUpdate,
        Self::ProjectKickOff,
        Self::CandidateInterview,
        Self::Retrospective,
        Self::StandUp,
    ];

    pub const DEFAULT: BuiltInType = BuiltInType::General;

    pub fn id(&self) -> &'static str {
        match self {
            Self::Chronological => "Chronological",
            Self::General => "General",
            Self::Sales => "Sales",
            Self::SalesSandler => "Sales - Sandler",
            Self::SalesSpiced => "Sales - SPICED",
            Self::SalesMeddpicc => "Sales - MEDDPICC",
            Self::SalesBant => "Sales - BANT",
            Self::QuestionsAndAnswers => "Q&A",
            Self::Demo => "Demo",
            Self::CustomerSuccess => "Customer Success",
            Self::CustomerSuccessReach => "Customer Success - REACH™",
            Self::OneOnOne => "One-on-One",
            Self::ProjectUpdate => "Project Update",
            Self::ProjectKickOff => "Project Kick-Off",
            Self::CandidateInterview => "Candidate Interview",
            Self::Retrospective => "Retrospective",
            Self::StandUp => "Stand Up",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Chronological => "Short summary of the meeting by chapter.",
            Self::General => "Capture any call's insights and key takeaways.",
            Self::Sales => "Unpack a prospect's needs, challenges, and buying journey.",
            Self::SalesSandler => "Notes based on Sandler Selling System.",
            Self::SalesSpiced => "Notes based on the sales methodology by Winning by Design.",
            Self::SalesMeddpicc => "Notes based on the popular sales methodology.",
            Self::SalesBant => "Notes based on the popular sales methodology.",
            Self::QuestionsAndAnswers => "Recap questions with answers.",
            Self::Demo => "Showcased journeys and impact.",
            Self::CustomerSuccess => "Experiences, challenges, goals, and Q&A.",
            Self::CustomerSuccessReach => "Notes based on an expansion framework by HelloCCO.",
            Self::OneOnOne => "Updates, priorities, support signals, and discussion.",
            Self::ProjectUpdate => "Breakdown each task's status, discussion, and next steps.",
            Self::ProjectKickOff => "Vision, targets, and resources.",
            Self::CandidateInterview => {
                "Delve into a candidate's experience, goals, and responses."
            }
            Self::Retrospective => "Capture processes to start, stop, and continue.",
            Self::StandUp => "Track daily progress, tasks, and obstacles.",
        }
    }

    /// Framework instruction steering generation for this type.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Chronological => "Focus on a chapter-by-chapter summary of the meeting. Break the transcript into distinct topics or time segments and provide a short summary for each. Keep it concise and chronological.",
            Self::General => "Focus on the discovery process and insights. Capture any call's insights and key takeaways. Identify major discussion points, decisions made, and key action items without requiring a specific framework.",
            Self::Sales => "Focus on the discovery process. Identify the prospect's primary needs, the specific business challenges they are facing, and where they currently sit in their buying journey (e.g., researching, comparing, ready to buy).",
            Self::SalesSandler => "Analyze the call using the Sandler Selling System. Specifically identify: 1. Pain (The emotional/business reason for change), 2. Budget (Ability and willingness to pay), and 3. Decision (Who, how, and when the decision is made).",
            Self::SalesSpiced => "Summarize using the SPICED framework: Situation (Context), Pain (The problem), Impact (Consequences of the pain), Critical Event (The deadline), and Decision Criteria.",
            Self::SalesMeddpicc => "Extract details for: Metrics (Economic impact), Economic Buyer, Decision Criteria, Decision Process, Paper Process, Identified Pain, Champions, and Competition.",
            Self::SalesBant => "Identify the four pillars of BANT: Budget (Is there a budget?), Authority (Who has the final say?), Need (What is the core problem?), and Timeline (When do they need a solution?).",
            Self::QuestionsAndAnswers => "Identify every distinct question asked during the session and provide the corresponding answer given. Format as a clean List of Questions and Answers.",
            Self::Demo => "Highlight the features or workflows showcased during the demo. Record the prospect's reaction to each feature and the specific business impact/value they associated with those features.",
            Self::CustomerSuccess => "Focus on the customer's health. Identify their current experience with the product, specific technical or business challenges mentioned, their short-term goals, and any questions they asked.",
            Self::CustomerSuccessReach => "Summarize using the REACH™ framework: Retention signals, Expansion opportunities, Adoption levels, Community involvement, and Health score indicators.",
            Self::OneOnOne => "Summarize the interaction focusing on: Employee updates, top priorities for the week, signals where support/coaching is needed, and a list of feedback exchanged.",
            Self::ProjectUpdate => "Create a status report. For every task mentioned, identify its current Status (On track/Blocked/Done), a summary of the discussion around it, and the specific next steps.",
            Self::ProjectKickOff => "Summarize the project launch details: The overarching Vision, specific Targets/KPIs, assigned Resources/Teams, and the immediate timeline.",
            Self::CandidateInterview => "Evaluate the candidate based on the transcript. Summarize their relevant experience, their stated career goals, and their specific responses to technical or behavioral questions.",
            Self::Retrospective => "Organize the summary into three categories: Start (New processes to implement), Stop (Inefficiencies to remove), and Continue (Successes to double down on).",
            Self::StandUp => "Extract the three standard stand-up components for each participant: 1. What was done yesterday, 2. What is being done today, and 3. Any obstacles or 'blockers' in the way.",
        }
    }
}
