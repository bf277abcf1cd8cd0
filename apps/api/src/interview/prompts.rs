// LLM prompt constants for the mock interview.

/// System instruction for question generation.
pub const QUESTIONS_SYSTEM: &str = "You are an experienced HR professional and interviewer. \
    Create realistic, relevant interview questions that help assess candidates effectively.";

/// Question generation template.
/// Replace: {num_questions}, {position}, {company_headline}, {company}, {experience_level},
///          {industry}, {interview_type}, {job_description}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = "\
Generate {num_questions} interview questions for a {position} position at {company_headline}.

Interview Details:
- Position: {position}
- Company: {company}
- Experience Level: {experience_level}
- Industry: {industry}
- Interview Type: {interview_type}
- Job Description: {job_description}

Create a mix of questions appropriate for the role and experience level:
- Include both behavioral and technical questions (as relevant)
- Ensure questions are realistic and commonly asked
- Vary difficulty based on experience level
- Make questions specific to the role and industry when possible

Format as a numbered list with each question on a new line.";

/// System instruction for feedback on a finished interview.
pub const FEEDBACK_SYSTEM: &str = "You are an experienced interview coach and HR professional. \
    Provide detailed, constructive feedback to help candidates improve their interview performance.";

/// Feedback template. Replace: {transcript}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = "\
Provide detailed feedback on this mock interview performance:

{transcript}

Please analyze:
1. Overall performance assessment
2. Strengths demonstrated in the responses
3. Areas for improvement
4. Specific suggestions for better answers
5. Body language and communication tips
6. Follow-up questions the candidate should be prepared for

Provide constructive, encouraging feedback that helps the candidate improve.";
