mod totp_generation;
