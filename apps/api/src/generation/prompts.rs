// All LLM prompt constants for resume, cover letter and advice generation.
// Placeholders are filled with `llm_client::prompts::fill_template`.

/// System instruction for resume generation.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer and career counselor \
    with experience across all industries and career fields.";

/// Resume generation template.
/// Replace: {name}, {email}, {phone}, {address}, {linkedin}, {education}, {skills},
///          {experience}, {certifications}, {target_job}, {template}
pub const RESUME_PROMPT_TEMPLATE: &str = "\
Generate a professional, ATS-friendly resume for {name}. Use the following information:

Personal Info:
- Email: {email}
- Phone: {phone}
- Address: {address}
- LinkedIn: {linkedin}

Education: {education}
Skills: {skills}
Experience: {experience}
Certifications: {certifications}

Target Job: {target_job}
Template Style: {template}

Create a professional, one-page resume suitable for any career field with sections: \
Professional Summary, Skills, Experience (reverse chronological), Education, and Certifications/Awards.
Tailor the content to match the target job description regardless of industry \
(business, healthcare, education, arts, engineering, etc.).
Use bullet points for achievements, quantify results where possible, and highlight relevant \
coursework, projects, internships, or volunteer work if applicable.
Keep it professional, concise, and ATS-friendly for all career fields. Word count: 400-600 words.";

/// System instruction for cover letters.
pub const COVER_LETTER_SYSTEM: &str = "You are a professional career advisor and expert cover \
    letter writer with extensive experience helping candidates across all industries secure interviews.";

/// Cover letter template.
/// Replace: {name}, {position}, {company}, {hiring_manager}, {experience_level}, {tone},
///          {job_description}, {background}, {why_company}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "\
Write a compelling cover letter for {name} applying for the {position} position at {company}.

Applicant Details:
- Name: {name}
- Target Company: {company}
- Position: {position}
- Hiring Manager: {hiring_manager}
- Experience Level: {experience_level}
- Desired Tone: {tone}

Job Description: {job_description}

Candidate Background: {background}

Company Interest: {why_company}

Create a professional cover letter that:
1. Opens with a strong hook that demonstrates knowledge of the company
2. Clearly connects the candidate's background to the job requirements
3. Shows genuine enthusiasm for the role and company
4. Includes specific examples and achievements
5. Ends with a confident call to action
6. Maintains the requested tone throughout
7. Is concise (250-350 words)

Format with proper business letter structure including header, date, and professional closing.";

/// System instruction for the advice chat.
pub const ADVICE_SYSTEM: &str = "You are an experienced career counselor and coach with \
    expertise across all industries. Provide thoughtful, practical career advice based on \
    current best practices and market trends.";

/// Advice template. Replace: {question}
pub const ADVICE_PROMPT_TEMPLATE: &str = "\
Career question: {question}

Please provide comprehensive, actionable career advice that:
1. Directly addresses the question
2. Provides specific, practical steps
3. Includes relevant examples or scenarios
4. Considers current job market trends
5. Offers multiple perspectives when appropriate
6. Is encouraging and supportive in tone

Make the advice detailed but easy to understand and implement.";
