// Resume analysis LLM prompt templates.
// All prompts for the analysis module are defined here.

pub const RESUME_PARSE_SYSTEM: &str = "\
You are a precise resume parser. \
Extract information exactly as it appears in the resume without adding any \
interpretation or additional information. \
The output should be in JSON format.";

pub const RESUME_PARSE_PROMPT: &str = "\
Parse the following resume content and extract the information as a JSON \
object with the exact keys: 'summary', 'skills', 'experience', 'education'. \
Return an empty string for any key that is not found.

Resume content:
{raw_text}";

pub const FIT_SCORE_SYSTEM: &str = "\
You are an expert HR professional and job recruiter. \
You are given a job vacancy and a resume. \
Your task is to analyze the resume and determine if the candidate is a good \
fit for the job. \
The output should be in JSON format. \
Provide a score from 0 to 100 for the candidate's suitability for the job, \
and a detailed feedback. \
The response should only be JSON that has the following keys: \
'aiGeneratedScore', 'aiGeneratedFeedback'. \
The feedback should be detailed and specific to the job and the candidate's \
resume.";

pub const FIT_SCORE_PROMPT: &str = "\
Please evaluate this job application. \
Job details: {job_details}. Resume details: {resume_details}.";
